//! In-memory storage implementation

use super::traits::FileStorage;
use super::types::{validate_filename, StorageError, StorageResult, StoredFile, UploadedFile};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory storage backend
///
/// Holds uploads in a map keyed by filename. Clones share the same map, so a
/// test can keep a handle and seed or inspect files behind the server's back.
/// Enumeration order matches [`LocalFileStorage`](super::LocalFileStorage):
/// byte-wise by filename.
///
/// # Examples
///
/// ```rust
/// use svg_inventory::storage::{FileStorage, MemoryFileStorage, UploadedFile};
///
/// # async fn example() -> anyhow::Result<()> {
/// let storage = MemoryFileStorage::new();
/// storage.insert("a.svg", &b"<svg/>"[..]);
///
/// assert_eq!(&storage.retrieve("a.svg").await?[..], b"<svg/>");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStorage {
    files: Arc<RwLock<BTreeMap<String, Bytes>>>,
}

impl MemoryFileStorage {
    /// Creates an empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a file directly, bypassing filename validation
    pub fn insert(&self, filename: impl Into<String>, data: impl Into<Bytes>) {
        self.files.write().insert(filename.into(), data.into());
    }

    /// Number of files currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Returns true when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn store(&self, file: UploadedFile) -> StorageResult<StoredFile> {
        validate_filename(&file.filename)?;
        let stored = StoredFile::new(file.filename.clone(), file.size());
        self.files.write().insert(file.filename, file.data);
        Ok(stored)
    }

    async fn retrieve(&self, filename: &str) -> StorageResult<Bytes> {
        self.files
            .read()
            .get(filename)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))
    }

    async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        Ok(self
            .files
            .read()
            .iter()
            .map(|(name, data)| StoredFile::new(name.clone(), data.len() as u64))
            .collect())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_retrieve() {
        let storage = MemoryFileStorage::new();

        let stored = storage
            .store(UploadedFile::new("a.svg", "image/svg+xml", &b"<svg/>"[..]))
            .await
            .unwrap();
        assert_eq!(stored, StoredFile::new("a.svg", 6));

        let data = storage.retrieve("a.svg").await.unwrap();
        assert_eq!(&data[..], b"<svg/>");
    }

    #[tokio::test]
    async fn test_clones_share_files() {
        let storage = MemoryFileStorage::new();
        let handle = storage.clone();

        handle.insert("b.txt", &b"hello"[..]);

        assert_eq!(&storage.retrieve("b.txt").await.unwrap()[..], b"hello");
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_list_order() {
        let storage = MemoryFileStorage::new();
        storage.insert("z.svg", &b""[..]);
        storage.insert("B.svg", &b""[..]);
        storage.insert("a.svg", &b""[..]);

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.filename)
            .collect();
        assert_eq!(names, vec!["B.svg", "a.svg", "z.svg"]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let storage = MemoryFileStorage::new();

        assert!(matches!(
            storage.retrieve("nope.svg").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_store_rejects_invalid_name() {
        let storage = MemoryFileStorage::new();

        let result = storage
            .store(UploadedFile::new("a/b.svg", "image/svg+xml", &b""[..]))
            .await;
        assert!(matches!(result.unwrap_err(), StorageError::InvalidPath(_)));
        assert!(storage.is_empty());
    }
}
