//! Catalog Store service
//!
//! Single source of truth for categories, link groups, favorites, workflows
//! and archived workflows. Every mutation updates the in-memory snapshot and
//! then replaces the affected storage documents.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::seed::default_nav_data;
use crate::storage::{KeyValueStorage, StorageKey};
use crate::types::{
    CatalogSnapshot, Link, LinkGroup, LinkGroupKey, MainCategory, NavData, Workflow,
    WorkflowFields, WorkflowType,
};

pub struct CatalogStore<S: KeyValueStorage> {
    storage: Arc<S>,
    state: RwLock<CatalogSnapshot>,
}

impl<S: KeyValueStorage> CatalogStore<S> {
    /// Create the store and load (or seed) its snapshot
    pub async fn open(storage: S) -> Self {
        let store = Self {
            storage: Arc::new(storage),
            state: RwLock::new(CatalogSnapshot::default()),
        };
        store.load().await;
        store
    }

    /// Re-read every key from storage. Never fails: unreadable or malformed
    /// keys are treated as absent, an absent catalog is seeded, and absent
    /// keys are written back so storage mirrors the returned snapshot.
    pub async fn load(&self) -> CatalogSnapshot {
        let mut missing = Vec::new();

        let nav = match self.read_document::<NavData>(StorageKey::NavData).await {
            Some(nav) => nav,
            None => {
                info!("No navigation data found, seeding built-in catalog");
                missing.push(StorageKey::NavData);
                default_nav_data()
            }
        };
        let favorites = self
            .read_or_missing(StorageKey::FavoriteLinks, &mut missing)
            .await;
        let workflows = self
            .read_or_missing(StorageKey::Workflows, &mut missing)
            .await;
        let archived_workflows = self
            .read_or_missing(StorageKey::ArchivedWorkflows, &mut missing)
            .await;

        let snapshot = CatalogSnapshot {
            nav,
            favorites,
            workflows,
            archived_workflows,
        };

        let mut state = self.state.write().await;
        *state = snapshot.clone();
        if let Err(e) = self.persist(&state, &missing).await {
            warn!("Failed to write initial documents: {}", e);
        }

        debug!(
            "Loaded {} categories, {} link groups, {} favorites, {} workflows ({} archived)",
            snapshot.nav.main_categories.len(),
            snapshot.nav.dev_links.len(),
            snapshot.favorites.len(),
            snapshot.workflows.len(),
            snapshot.archived_workflows.len()
        );
        snapshot
    }

    /// Replace the whole snapshot and persist every key
    pub async fn save(&self, snapshot: CatalogSnapshot) -> Result<()> {
        let mut state = self.state.write().await;
        *state = snapshot;
        self.persist(&state, &StorageKey::ALL).await
    }

    /// Current in-memory snapshot
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    // ==================== Categories ====================

    /// Replace the category with the same id in place, or append it.
    /// An empty id is replaced with a freshly generated one.
    pub async fn upsert_category(&self, mut category: MainCategory) -> Result<CatalogSnapshot> {
        category.validate()?;

        let mut state = self.state.write().await;
        let categories = &mut state.nav.main_categories;

        if category.id.is_empty() {
            category.id = generate_category_id(categories);
        }

        match categories.iter().position(|c| c.id == category.id) {
            Some(index) => categories[index] = category,
            None => categories.push(category),
        }

        self.persist(&state, &[StorageKey::NavData]).await?;
        Ok(state.clone())
    }

    /// Remove a category and every link group that references it
    pub async fn delete_category(&self, id: &str) -> Result<CatalogSnapshot> {
        let mut state = self.state.write().await;

        let before = (state.nav.main_categories.len(), state.nav.dev_links.len());
        state.nav.main_categories.retain(|c| c.id != id);
        state.nav.dev_links.retain(|g| g.main_category != id);
        let after = (state.nav.main_categories.len(), state.nav.dev_links.len());

        if before != after {
            info!(
                "Deleted category {} and {} link groups",
                id,
                before.1 - after.1
            );
            self.persist(&state, &[StorageKey::NavData]).await?;
        }
        Ok(state.clone())
    }

    // ==================== Link groups ====================

    /// Replace the first group with the same `(category, mainCategory)` pair,
    /// or append
    pub async fn upsert_link_group(&self, group: LinkGroup) -> Result<CatalogSnapshot> {
        group.validate()?;

        let mut state = self.state.write().await;
        let key = group.key();
        let groups = &mut state.nav.dev_links;

        match groups.iter().position(|g| g.has_key(&key)) {
            Some(index) => groups[index] = group,
            None => groups.push(group),
        }

        self.persist(&state, &[StorageKey::NavData]).await?;
        Ok(state.clone())
    }

    /// Replace the group found under `original`, which may rename it.
    /// No-op when the original group no longer exists.
    pub async fn replace_link_group(
        &self,
        original: &LinkGroupKey,
        group: LinkGroup,
    ) -> Result<CatalogSnapshot> {
        group.validate()?;

        let mut state = self.state.write().await;
        let Some(index) = state.nav.dev_links.iter().position(|g| g.has_key(original)) else {
            debug!(
                "Link group {}/{} not found, nothing replaced",
                original.main_category, original.category
            );
            return Ok(state.clone());
        };

        state.nav.dev_links[index] = group;
        self.persist(&state, &[StorageKey::NavData]).await?;
        Ok(state.clone())
    }

    pub async fn delete_link_group(
        &self,
        category_name: &str,
        main_category_id: &str,
    ) -> Result<CatalogSnapshot> {
        let key = LinkGroupKey::new(category_name, main_category_id);

        let mut state = self.state.write().await;
        let before = state.nav.dev_links.len();
        state.nav.dev_links.retain(|g| !g.has_key(&key));

        if state.nav.dev_links.len() != before {
            self.persist(&state, &[StorageKey::NavData]).await?;
        }
        Ok(state.clone())
    }

    // ==================== Favorites ====================

    /// Add the link if its url is not a favorite yet, otherwise remove it.
    /// Returns whether the url is a favorite afterwards.
    pub async fn toggle_favorite(&self, link: Link) -> Result<bool> {
        let mut state = self.state.write().await;

        let favorited = if state.favorites.iter().any(|f| f.url == link.url) {
            state.favorites.retain(|f| f.url != link.url);
            false
        } else {
            state.favorites.push(link);
            true
        };

        self.persist(&state, &[StorageKey::FavoriteLinks]).await?;
        Ok(favorited)
    }

    pub async fn remove_favorite(&self, url: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.favorites.len();
        state.favorites.retain(|f| f.url != url);

        let removed = state.favorites.len() != before;
        if removed {
            self.persist(&state, &[StorageKey::FavoriteLinks]).await?;
        }
        Ok(removed)
    }

    pub async fn is_favorite(&self, url: &str) -> bool {
        self.state.read().await.favorites.iter().any(|f| f.url == url)
    }

    pub async fn favorites(&self) -> Vec<Link> {
        self.state.read().await.favorites.clone()
    }

    // ==================== Workflows ====================

    pub async fn create_workflow(&self, fields: WorkflowFields) -> Result<Workflow> {
        fields.validate()?;
        let workflow = Workflow::create(fields);

        let mut state = self.state.write().await;
        state.workflows.push(workflow.clone());
        self.persist(&state, &[StorageKey::Workflows]).await?;

        info!("Created workflow {} ({})", workflow.name, workflow.id);
        Ok(workflow)
    }

    /// Replace the editable fields of a live workflow
    pub async fn update_workflow(&self, id: Uuid, fields: WorkflowFields) -> Result<Workflow> {
        fields.validate()?;

        let mut state = self.state.write().await;
        let workflow = state
            .workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("workflow {id}")))?;
        workflow.apply(fields);
        let updated = workflow.clone();

        self.persist(&state, &[StorageKey::Workflows]).await?;
        Ok(updated)
    }

    /// Move a live workflow to the archive
    pub async fn delete_workflow(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(index) = state.workflows.iter().position(|w| w.id == id) else {
            return Ok(false);
        };

        let workflow = state.workflows.remove(index);
        info!("Archived workflow {} ({})", workflow.name, workflow.id);
        state.archived_workflows.push(workflow);

        self.persist(&state, &[StorageKey::Workflows, StorageKey::ArchivedWorkflows])
            .await?;
        Ok(true)
    }

    /// Move an archived workflow back to the live list
    pub async fn restore_workflow(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(index) = state.archived_workflows.iter().position(|w| w.id == id) else {
            return Ok(false);
        };

        let workflow = state.archived_workflows.remove(index);
        info!("Restored workflow {} ({})", workflow.name, workflow.id);
        state.workflows.push(workflow);

        self.persist(&state, &[StorageKey::Workflows, StorageKey::ArchivedWorkflows])
            .await?;
        Ok(true)
    }

    /// Permanently remove an archived workflow
    pub async fn purge_archived(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.archived_workflows.len();
        state.archived_workflows.retain(|w| w.id != id);

        let purged = state.archived_workflows.len() != before;
        if purged {
            self.persist(&state, &[StorageKey::ArchivedWorkflows]).await?;
        }
        Ok(purged)
    }

    /// Flip `completed` on a temporary workflow. Returns whether anything changed.
    pub async fn toggle_workflow_completion(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let changed = state
            .workflows
            .iter_mut()
            .find(|w| w.id == id)
            .map(|w| w.toggle_completed())
            .unwrap_or(false);

        if changed {
            self.persist(&state, &[StorageKey::Workflows]).await?;
        }
        Ok(changed)
    }

    pub async fn workflow(&self, id: Uuid) -> Option<Workflow> {
        let state = self.state.read().await;
        state.workflows.iter().find(|w| w.id == id).cloned()
    }

    pub async fn workflows(&self) -> Vec<Workflow> {
        self.state.read().await.workflows.clone()
    }

    pub async fn workflows_by_type(&self, workflow_type: WorkflowType) -> Vec<Workflow> {
        let state = self.state.read().await;
        state
            .workflows
            .iter()
            .filter(|w| w.workflow_type == workflow_type)
            .cloned()
            .collect()
    }

    pub async fn archived_workflows(&self) -> Vec<Workflow> {
        self.state.read().await.archived_workflows.clone()
    }

    // ==================== Catalog views ====================

    pub async fn main_categories(&self) -> Vec<MainCategory> {
        self.state.read().await.nav.main_categories.clone()
    }

    pub async fn link_groups(&self) -> Vec<LinkGroup> {
        self.state.read().await.nav.dev_links.clone()
    }

    pub async fn groups_in_category(&self, main_category_id: &str) -> Vec<LinkGroup> {
        let state = self.state.read().await;
        state
            .nav
            .dev_links
            .iter()
            .filter(|g| g.main_category == main_category_id)
            .cloned()
            .collect()
    }

    /// Category name for display, or the raw id when the reference dangles
    pub async fn category_display_name(&self, id: &str) -> String {
        let state = self.state.read().await;
        state
            .nav
            .main_categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Every link of every group, in catalog order
    pub async fn all_links(&self) -> Vec<Link> {
        let state = self.state.read().await;
        state
            .nav
            .dev_links
            .iter()
            .flat_map(|g| g.links.iter().cloned())
            .collect()
    }

    pub async fn total_link_count(&self) -> usize {
        let state = self.state.read().await;
        state.nav.dev_links.iter().map(|g| g.links.len()).sum()
    }

    // ==================== Persistence helpers ====================

    async fn read_document<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        match self.storage.read(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Failed to parse {} from storage: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read {} from storage: {}", key, e);
                None
            }
        }
    }

    async fn read_or_missing<T: DeserializeOwned + Default>(
        &self,
        key: StorageKey,
        missing: &mut Vec<StorageKey>,
    ) -> T {
        match self.read_document(key).await {
            Some(value) => value,
            None => {
                missing.push(key);
                T::default()
            }
        }
    }

    async fn persist(&self, snapshot: &CatalogSnapshot, keys: &[StorageKey]) -> Result<()> {
        for key in keys {
            match key {
                StorageKey::NavData => self.write_document(*key, &snapshot.nav).await?,
                StorageKey::FavoriteLinks => {
                    self.write_document(*key, &snapshot.favorites).await?
                }
                StorageKey::Workflows => self.write_document(*key, &snapshot.workflows).await?,
                StorageKey::ArchivedWorkflows => {
                    self.write_document(*key, &snapshot.archived_workflows)
                        .await?
                }
            }
        }
        Ok(())
    }

    async fn write_document<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)?;
        self.storage.write(key, &contents).await
    }
}

fn generate_category_id(existing: &[MainCategory]) -> String {
    loop {
        let id = format!("cat-{}", &Uuid::new_v4().simple().to_string()[..12]);
        if !existing.iter().any(|c| c.id == id) {
            return id;
        }
    }
}
