mod category;
mod link;
mod snapshot;
mod workflow;

pub use category::{CategoryId, Icon, MainCategory, CATEGORY_COLORS, GROUP_COLORS};
pub use link::{Link, LinkGroup, LinkGroupKey};
pub use snapshot::{CatalogSnapshot, NavData};
pub use workflow::{Workflow, WorkflowFields, WorkflowType, WorkflowUrl};
