//! File-backed key-value store.
//!
//! Stores each key as a separate file under a root directory, mirroring
//! a mobile secure store: small string values addressed by name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use pitchside_application::ports::{KeyValueStore, StoreError};

/// Key-value store persisting each entry as a file under a root directory.
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to its file path, rejecting keys that would
    /// escape the root directory.
    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key == "."
            || key == ".."
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let value = store.get("authToken").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("authToken", "abc123").await.unwrap();
        let value = store.get("authToken").await.unwrap();
        assert_eq!(value, Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("authToken", "old").await.unwrap();
        store.set("authToken", "new").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("userInfo", "{}").await.unwrap();
        store.delete("userInfo").await.unwrap();
        assert_eq!(store.get("userInfo").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.delete("nothing").await.is_ok());
    }

    #[tokio::test]
    async fn test_keys_with_separators_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let result = store.get("../escape").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));

        let result = store.set("a/b", "x").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_root_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("store");
        let store = FileKeyValueStore::new(&nested);

        store.set("authToken", "tok").await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.get("authToken").await.unwrap(), Some("tok".to_string()));
    }
}
