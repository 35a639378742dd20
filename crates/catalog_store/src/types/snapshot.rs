//! Snapshot documents held in memory and persisted per storage key

use serde::{Deserialize, Serialize};

use super::category::MainCategory;
use super::link::{Link, LinkGroup};
use super::workflow::Workflow;

/// The `navData` document: main categories plus their link groups
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavData {
    #[serde(default)]
    pub main_categories: Vec<MainCategory>,

    #[serde(default)]
    pub dev_links: Vec<LinkGroup>,
}

/// Everything the catalog store owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub nav: NavData,
    pub favorites: Vec<Link>,
    pub workflows: Vec<Workflow>,
    pub archived_workflows: Vec<Workflow>,
}
