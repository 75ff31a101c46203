use crate::domain_port::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Durable `LocalStore` backed by a single JSON object on disk. The file is
/// rewritten whole on every mutation; the lock serializes read-modify-write
/// cycles within this process.
pub struct FileLocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLocalStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::Malformed(e.to_string()))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(error) => Err(StoreError::Io(error.to_string())),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| *p != Path::new("")) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(map).map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[async_trait::async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoid::nanoid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("kumite-store-{}.json", nanoid!(8)))
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() {
        let path = scratch_path();
        let store = FileLocalStore::new(&path);
        store.set(ACCESS_TOKEN_KEY, "acc-1").await.unwrap();

        let reopened = FileLocalStore::new(&path);
        assert_eq!(
            reopened.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
            Some("acc-1")
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let store = FileLocalStore::new(scratch_path());
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_deletes_only_the_named_key() {
        let path = scratch_path();
        let store = FileLocalStore::new(&path);
        store.set(ACCESS_TOKEN_KEY, "acc").await.unwrap();
        store.set(REFRESH_TOKEN_KEY, "ref").await.unwrap();

        store.remove(ACCESS_TOKEN_KEY).await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(
            store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("ref")
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn corrupt_file_reports_malformed() {
        let path = scratch_path();
        tokio::fs::write(&path, "{broken").await.unwrap();
        let store = FileLocalStore::new(&path);

        assert!(matches!(
            store.get("anything").await,
            Err(StoreError::Malformed(_))
        ));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
