//! JSON file-backed store.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::storage::{CartStore, StoreError};

/// Store that keeps every key in a single JSON object on disk.
///
/// The file is re-read on each access so several processes sharing it see
/// each other's writes. Writes land in a sibling temporary file first and are
/// renamed over the original, so a crash never leaves a half-written map.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        fs::write(&tmp, serde_json::to_vec_pretty(map)?).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "store written");

        Ok(())
    }
}

#[async_trait]
impl CartStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;

        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);

        self.write_map(&map).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() -> TestResult {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("storage.json"));

        assert_eq!(store.get("cart").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn set_creates_parent_directories() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("storage.json");
        let store = JsonFileStore::new(&path);

        store.set("cart", "[]".to_string()).await?;

        assert!(path.exists(), "store file should be created");

        Ok(())
    }

    #[tokio::test]
    async fn values_survive_reopening() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");

        JsonFileStore::new(&path)
            .set("cart", r#"[{"id":1}]"#.to_string())
            .await?;

        let reopened = JsonFileStore::new(&path);

        assert_eq!(
            reopened.get("cart").await?.as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_keeps_other_keys() -> TestResult {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("storage.json"));

        store.set("theme", "dark".to_string()).await?;
        store.set("cart", "[]".to_string()).await?;

        assert_eq!(store.get("theme").await?.as_deref(), Some("dark"));
        assert_eq!(store.get("cart").await?.as_deref(), Some("[]"));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");

        std::fs::write(&path, "not json")?;

        let result = JsonFileStore::new(&path).get("cart").await;

        assert!(
            matches!(result, Err(StoreError::Json(_))),
            "expected Json error, got {result:?}"
        );

        Ok(())
    }
}
