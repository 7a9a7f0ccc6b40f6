use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::traits::KeyValueStore;


/// A store that saves every value in its own file, inside a local folder
#[derive(Debug)]
pub struct FileStore {
    backing_folder: PathBuf,
}

impl FileStore {
    /// Use `folder` as the backing folder, creating it if needed
    pub async fn open(folder: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(folder).await?;
        log::debug!("Using {:?} as a backing folder", folder);
        Ok(Self {
            backing_folder: PathBuf::from(folder),
        })
    }

    pub fn backing_folder(&self) -> &Path {
        &self.backing_folder
    }

    /// The file `key` is stored into.
    ///
    /// The sanitized key keeps file names readable, the name-based UUID keeps distinct keys in distinct files
    pub fn file_for(&self, key: &str) -> PathBuf {
        let digest = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, key.as_bytes()).to_simple();
        let name = format!("{}-{}", sanitize_filename::sanitize(key), digest);
        self.backing_folder.join(name)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                log::warn!("Unable to read file {:?}: {}", path, err);
                Err(err.into())
            },
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.file_for(key);
        // Write aside, then move into place, so that a reader never sees a half-written file
        let tmp_path = self.backing_folder.join(format!(".{}.tmp",
            uuid::Uuid::new_v4().to_hyphenated()));

        if let Err(err) = tokio::fs::write(&tmp_path, value).await {
            log::warn!("Unable to save file {:?}: {}", tmp_path, err);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        if let Err(err) = tokio::fs::rename(&tmp_path, &path).await {
            log::warn!("Unable to move {:?} to {:?}: {}", tmp_path, path, err);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.file_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopening() {
        let folder = tempfile::tempdir().unwrap();
        let nested = folder.path().join("datebook");

        let store = FileStore::open(&nested).await.unwrap();
        assert_eq!(store.get("tasks").await.unwrap(), None);
        store.set("tasks", "[]".to_string()).await.unwrap();
        store.set("tasks", "[1]".to_string()).await.unwrap();

        let reopened = FileStore::open(&nested).await.unwrap();
        assert_eq!(reopened.get("tasks").await.unwrap(), Some("[1]".to_string()));

        reopened.remove("tasks").await.unwrap();
        reopened.remove("tasks").await.unwrap();
        assert_eq!(store.get("tasks").await.unwrap(), None);

        // No temporary file is left behind
        let mut entries = std::fs::read_dir(&nested).unwrap();
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn keys_are_sanitized() {
        let folder = tempfile::tempdir().unwrap();
        let store = FileStore::open(folder.path()).await.unwrap();

        let path = store.file_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(folder.path()));

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.contains("etcpasswd-"));
        assert!(name.contains('/') == false);
    }

    #[tokio::test]
    async fn distinct_keys_use_distinct_files() {
        let folder = tempfile::tempdir().unwrap();
        let store = FileStore::open(folder.path()).await.unwrap();

        assert_ne!(store.file_for("a/b"), store.file_for("ab"));
        assert_eq!(store.file_for("a/b"), store.file_for("a/b"));

        store.set("a/b", "slash".to_string()).await.unwrap();
        store.set("ab", "plain".to_string()).await.unwrap();
        store.set("", "empty".to_string()).await.unwrap();
        assert_eq!(store.get("a/b").await.unwrap(), Some("slash".to_string()));
        assert_eq!(store.get("ab").await.unwrap(), Some("plain".to_string()));
        assert_eq!(store.get("").await.unwrap(), Some("empty".to_string()));

        store.remove("a/b").await.unwrap();
        assert_eq!(store.get("a/b").await.unwrap(), None);
        assert_eq!(store.get("ab").await.unwrap(), Some("plain".to_string()));
    }
}
