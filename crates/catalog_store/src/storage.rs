//! Key-value storage trait and implementations

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

/// Logical keys under which the catalog is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    NavData,
    FavoriteLinks,
    Workflows,
    ArchivedWorkflows,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::NavData,
        StorageKey::FavoriteLinks,
        StorageKey::Workflows,
        StorageKey::ArchivedWorkflows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NavData => "navData",
            Self::FavoriteLinks => "favoriteLinks",
            Self::Workflows => "workflows",
            Self::ArchivedWorkflows => "archivedWorkflows",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-document storage: every write replaces the document for its key
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw document, `None` if the key was never written
    async fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the document for a key
    async fn write(&self, key: StorageKey, contents: &str) -> Result<()>;
}

/// File-based storage, one JSON document per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.as_str()))
    }

    fn temp_path(&self, key: StorageKey) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key.as_str()))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::StorageError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write(&self, key: StorageKey, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        // Write beside the target, then rename over it
        let tmp = self.temp_path(key);
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, self.key_path(key)).await?;

        debug!("Wrote {} ({} bytes)", key, contents.len());
        Ok(())
    }
}

/// In-memory storage for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.documents.read().await.get(&key).cloned())
    }

    async fn write(&self, key: StorageKey, contents: &str) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(key, contents.to_string());
        Ok(())
    }
}

#[async_trait]
impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    async fn read(&self, key: StorageKey) -> Result<Option<String>> {
        (**self).read(key).await
    }

    async fn write(&self, key: StorageKey, contents: &str) -> Result<()> {
        (**self).write(key, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_storage_write_and_read() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.write(StorageKey::Workflows, "[]").await.unwrap();

        let loaded = storage.read(StorageKey::Workflows).await.unwrap();
        assert_eq!(loaded.as_deref(), Some("[]"));
        assert!(dir.path().join("workflows.json").exists());
        assert!(!dir.path().join(".workflows.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_storage_missing_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let loaded = storage.read(StorageKey::NavData).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_file_storage_creates_base_dir() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.write(StorageKey::FavoriteLinks, "[]").await.unwrap();
        assert!(storage.read(StorageKey::FavoriteLinks).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_storage_unreadable_key_reports_path() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("navData.json")).unwrap();
        let storage = FileStorage::new(dir.path());

        match storage.read(StorageKey::NavData).await {
            Err(StoreError::StorageError(message)) => assert!(message.contains("navData.json")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_memory_storage_replaces_document() {
        let storage = MemoryStorage::new();
        storage.write(StorageKey::Workflows, "[1]").await.unwrap();
        storage.write(StorageKey::Workflows, "[2]").await.unwrap();

        let loaded = storage.read(StorageKey::Workflows).await.unwrap();
        assert_eq!(loaded.as_deref(), Some("[2]"));
    }
}
