//! Workflow definitions: named bundles of URLs opened together

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Recurring (permanent) or one-off, completable (temporary)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowType {
    #[default]
    Permanent,
    Temporary,
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permanent => f.write_str("permanent"),
            Self::Temporary => f.write_str("temporary"),
        }
    }
}

/// One URL row of a workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowUrl {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl WorkflowUrl {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub urls: Vec<WorkflowUrl>,
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Only meaningful for temporary workflows
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// Build a new workflow from sanitized fields with a fresh id and timestamp
    pub(crate) fn create(fields: WorkflowFields) -> Self {
        let fields = fields.sanitized();
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            urls: fields.urls,
            workflow_type: fields.workflow_type,
            tags: fields.tags,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Apply edited fields; `id`, `created_at` and `completed` are kept
    pub(crate) fn apply(&mut self, fields: WorkflowFields) {
        let fields = fields.sanitized();
        self.name = fields.name;
        self.description = fields.description;
        self.urls = fields.urls;
        self.workflow_type = fields.workflow_type;
        self.tags = fields.tags;
    }

    pub fn is_temporary(&self) -> bool {
        self.workflow_type == WorkflowType::Temporary
    }

    /// Flip `completed`; permanent workflows are left untouched
    pub fn toggle_completed(&mut self) -> bool {
        if !self.is_temporary() {
            return false;
        }
        self.completed = !self.completed;
        true
    }

    /// URLs to hand to the host for bulk opening
    pub fn open_targets(&self) -> Vec<&str> {
        self.urls
            .iter()
            .map(|u| u.url.as_str())
            .filter(|u| !u.is_empty())
            .collect()
    }
}

/// Editable workflow fields as submitted by the editor form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowFields {
    pub name: String,
    pub description: String,
    pub urls: Vec<WorkflowUrl>,
    pub workflow_type: WorkflowType,
    pub tags: Vec<String>,
}

impl WorkflowFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.push(WorkflowUrl::new(name, url));
        self
    }

    pub fn with_type(mut self, workflow_type: WorkflowType) -> Self {
        self.workflow_type = workflow_type;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }

    /// Drop URL rows missing a name or url, and normalize tags into an
    /// ordered set of trimmed, non-empty strings
    pub fn sanitized(mut self) -> Self {
        self.urls.retain(|u| !u.name.is_empty() && !u.url.is_empty());

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        self.tags = tags;
        self
    }
}

impl From<&Workflow> for WorkflowFields {
    fn from(workflow: &Workflow) -> Self {
        Self {
            name: workflow.name.clone(),
            description: workflow.description.clone(),
            urls: workflow.urls.clone(),
            workflow_type: workflow.workflow_type,
            tags: workflow.tags.clone(),
        }
    }
}
