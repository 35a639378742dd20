//! # Nav Search
//!
//! Filtering for the navigation dashboard. Link groups are annotated with
//! pinyin transliterations so Chinese names can be found by full pinyin
//! or by initials; workflows use plain substring search.

pub mod dashboard;
pub mod debounce;
pub mod index;
pub mod phonetic;
pub mod query;
pub mod workflow;

pub use dashboard::{build_dashboard, DashboardSection, ExpansionState};
pub use debounce::{Debouncer, SearchSession};
pub use index::{filter_link_groups, GroupHit, IndexedGroup, IndexedLink, SearchIndex, SearchResults};
pub use phonetic::{PhoneticCache, PhoneticKey};
pub use query::SearchQuery;
pub use workflow::{filter_workflows, WorkflowBuckets};
