//! Workflow search: plain substring matching split by workflow type

use catalog_store::{Workflow, WorkflowType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowBuckets {
    pub permanent: Vec<Workflow>,
    pub temporary: Vec<Workflow>,
}

impl WorkflowBuckets {
    pub fn len(&self) -> usize {
        self.permanent.len() + self.temporary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn workflow_matches(term: &str, workflow: &Workflow) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);

    contains(&workflow.name)
        || contains(&workflow.description)
        || workflow.tags.iter().any(|tag| contains(tag))
        || workflow
            .urls
            .iter()
            .any(|u| contains(&u.name) || contains(&u.url))
}

/// Split workflows by type, keeping those whose name, description, tags,
/// url names or urls contain the trimmed query (case-insensitive)
pub fn filter_workflows(raw_query: &str, workflows: &[Workflow]) -> WorkflowBuckets {
    let term = raw_query.trim().to_lowercase();

    let mut buckets = WorkflowBuckets::default();
    for workflow in workflows {
        if !term.is_empty() && !workflow_matches(&term, workflow) {
            continue;
        }
        match workflow.workflow_type {
            WorkflowType::Permanent => buckets.permanent.push(workflow.clone()),
            WorkflowType::Temporary => buckets.temporary.push(workflow.clone()),
        }
    }
    buckets
}
