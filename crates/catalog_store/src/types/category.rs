//! Main category definitions

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a main category (e.g. "dev-tools")
pub type CategoryId = String;

/// Color choices offered by the category editor
pub const CATEGORY_COLORS: [&str; 8] = [
    "bg-blue-500",
    "bg-green-500",
    "bg-purple-500",
    "bg-red-500",
    "bg-yellow-500",
    "bg-indigo-500",
    "bg-pink-500",
    "bg-gray-500",
];

/// Color choices offered by the link group editor
pub const GROUP_COLORS: [&str; 8] = [
    "bg-blue-100 text-blue-800",
    "bg-green-100 text-green-800",
    "bg-purple-100 text-purple-800",
    "bg-red-100 text-red-800",
    "bg-yellow-100 text-yellow-800",
    "bg-indigo-100 text-indigo-800",
    "bg-pink-100 text-pink-800",
    "bg-gray-100 text-gray-800",
];

/// Icon names offered by the editors. Names outside the known set are kept
/// verbatim in `Other` so stored documents survive a load/save unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    #[default]
    Code,
    Users,
    TestTube,
    Server,
    Wrench,
    Database,
    BarChart,
    Shield,
    GitBranch,
    Calendar,
    FileText,
    Other(String),
}

impl Icon {
    pub const ALL: [Icon; 11] = [
        Icon::Code,
        Icon::Users,
        Icon::TestTube,
        Icon::Server,
        Icon::Wrench,
        Icon::Database,
        Icon::BarChart,
        Icon::Shield,
        Icon::GitBranch,
        Icon::Calendar,
        Icon::FileText,
    ];

    pub fn name(&self) -> &str {
        match self {
            Self::Code => "Code",
            Self::Users => "Users",
            Self::TestTube => "TestTube",
            Self::Server => "Server",
            Self::Wrench => "Wrench",
            Self::Database => "Database",
            Self::BarChart => "BarChart",
            Self::Shield => "Shield",
            Self::GitBranch => "GitBranch",
            Self::Calendar => "Calendar",
            Self::FileText => "FileText",
            Self::Other(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// The icon to draw; unknown names render as `Code`
    pub fn resolved(&self) -> Icon {
        match self {
            Self::Other(_) => Self::Code,
            known => known.clone(),
        }
    }

    /// Look up a known icon by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.name() == name)
    }
}

impl From<String> for Icon {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or(Self::Other(name))
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        match icon {
            Icon::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A top-level grouping that owns zero or more link groups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MainCategory {
    /// Unique key; empty means "generate one on insert"
    #[serde(default)]
    pub id: CategoryId,

    pub name: String,

    #[serde(default)]
    pub icon: Icon,

    #[serde(default)]
    pub description: String,

    /// Color token (e.g. "bg-blue-500")
    #[serde(rename = "color", default = "default_category_color")]
    pub color_token: String,
}

fn default_category_color() -> String {
    CATEGORY_COLORS[0].to_string()
}

impl MainCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: Icon::default(),
            description: String::new(),
            color_token: default_category_color(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color_token: impl Into<String>) -> Self {
        self.color_token = color_token.into();
        self
    }

    /// Check the fields the editor marks as required
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_icon_renders_as_code_and_round_trips() {
        let raw = r#"{"id":"x","name":"X","icon":"Rocket","description":"","color":"bg-red-500"}"#;
        let category: MainCategory = serde_json::from_str(raw).unwrap();

        assert_eq!(category.icon, Icon::Other("Rocket".to_string()));
        assert!(!category.icon.is_known());
        assert_eq!(category.icon.resolved(), Icon::Code);

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["icon"], "Rocket");
    }

    #[test]
    fn test_known_icon_names_parse() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from(icon.name().to_string()), icon);
            assert!(icon.is_known());
        }
        assert_eq!(Icon::from_name("Rocket"), None);
    }

    #[test]
    fn test_icon_serializes_by_name() {
        let category = MainCategory::new("ops", "运维").with_icon(Icon::GitBranch);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["icon"], "GitBranch");
        assert_eq!(json["color"], "bg-blue-500");
    }

    #[test]
    fn test_validate_requires_name() {
        let category = MainCategory::new("ops", "  ");
        assert_eq!(
            category.validate(),
            Err(ValidationError::MissingField("name"))
        );
        assert!(MainCategory::new("", "运维").validate().is_ok());
    }
}
