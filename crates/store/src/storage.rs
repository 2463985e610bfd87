//! File-backed persistent store.
//!
//! One UTF-8 file per key under a configured directory, whole blob replaced
//! on every write. Writes go through a temp file plus rename so an
//! interrupted write never corrupts the previous blob.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::ports::PersistentStore;

/// `PersistentStore` backed by JSON files in a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        // Keys may contain characters that are not filename-safe everywhere
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(name).with_extension("json")
    }
}

#[async_trait]
impl PersistentStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.blob_path(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.blob_path(key);
        let tmp = temp_path(&path);
        tokio::fs::write(&tmp, blob).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_absent_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.read("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.write("shopcart.cart", "[1,2,3]").await.unwrap();
        let blob = store.read("shopcart.cart").await.unwrap();
        assert_eq!(blob.as_deref(), Some("[1,2,3]"));
    }

    #[tokio::test]
    async fn test_write_replaces_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.write("k", "old").await.unwrap();
        store.write("k", "new").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_keys_are_sanitized_to_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.write("a:b/c", "x").await.unwrap();
        assert_eq!(store.read("a:b/c").await.unwrap().as_deref(), Some("x"));
        assert!(dir.path().join("a_b_c.json").exists());
    }
}
