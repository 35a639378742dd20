//! Links and link groups

use serde::{Deserialize, Serialize};

use super::category::{Icon, GROUP_COLORS};
use crate::error::ValidationError;

/// A name/URL pair. Favorites use `url` as the identity key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Identity of a link group: its display name plus the owning main category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkGroupKey {
    pub category: String,
    pub main_category: String,
}

impl LinkGroupKey {
    pub fn new(category: impl Into<String>, main_category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            main_category: main_category.into(),
        }
    }
}

/// A named, categorized, ordered collection of links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkGroup {
    /// Display name
    pub category: String,

    /// Id of the owning main category (may dangle)
    pub main_category: String,

    #[serde(default)]
    pub icon: Icon,

    #[serde(rename = "color", default = "default_group_color")]
    pub color_token: String,

    #[serde(default)]
    pub links: Vec<Link>,
}

fn default_group_color() -> String {
    GROUP_COLORS[0].to_string()
}

impl LinkGroup {
    pub fn new(category: impl Into<String>, main_category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            main_category: main_category.into(),
            icon: Icon::default(),
            color_token: default_group_color(),
            links: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color_token: impl Into<String>) -> Self {
        self.color_token = color_token.into();
        self
    }

    pub fn with_link(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.push(Link::new(name, url));
        self
    }

    pub fn key(&self) -> LinkGroupKey {
        LinkGroupKey::new(self.category.clone(), self.main_category.clone())
    }

    pub fn has_key(&self, key: &LinkGroupKey) -> bool {
        self.category == key.category && self.main_category == key.main_category
    }

    /// Check the fields the editor marks as required
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if self.main_category.trim().is_empty() {
            return Err(ValidationError::MissingField("mainCategory"));
        }
        for (index, link) in self.links.iter().enumerate() {
            if link.name.is_empty() || link.url.is_empty() {
                return Err(ValidationError::IncompleteLink { index });
            }
        }
        Ok(())
    }
}
