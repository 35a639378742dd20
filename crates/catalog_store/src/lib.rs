//! # Catalog Store
//!
//! Owns the navigation dashboard's data: main categories, link groups,
//! favorite links, workflows and archived workflows. Each of the four
//! documents is persisted under its own storage key and degrades to
//! "absent" independently when it cannot be read.

pub mod config;
pub mod error;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;

// Re-exports
pub use config::NavConfig;
pub use error::{Result, StoreError, ValidationError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageKey};
pub use store::CatalogStore;
pub use types::*;
