//! File storage trait definitions

use super::types::{StorageResult, StoredFile, UploadedFile};
use async_trait::async_trait;
use bytes::Bytes;

/// Abstraction for upload storage backends
///
/// Storage is a flat namespace: the filename is the only identifier, a later
/// upload with the same name replaces the earlier one, and there is no sidecar
/// metadata. Everything the inventory pipeline needs (the listing, sizes and
/// raw bytes) comes from these operations.
///
/// # Implementation Requirements
///
/// Implementations must:
/// - Reject filenames that fail [`validate_filename`](super::validate_filename)
/// - Enumerate in a deterministic order (byte-wise by filename)
/// - Only report a file in [`list`](FileStorage::list) once its bytes are readable
///
/// # Examples
///
/// ```rust,no_run
/// use svg_inventory::storage::{FileStorage, MemoryFileStorage, UploadedFile};
///
/// # async fn example() -> anyhow::Result<()> {
/// let storage = MemoryFileStorage::new();
///
/// storage.store(UploadedFile::new("a.svg", "image/svg+xml", &b"<svg/>"[..])).await?;
/// let data = storage.retrieve("a.svg").await?;
/// assert_eq!(&data[..], b"<svg/>");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes an uploaded file verbatim under its filename
    ///
    /// Any existing file with the same name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The filename is not a plain file name (`StorageError::InvalidPath`)
    /// - File I/O fails
    async fn store(&self, file: UploadedFile) -> StorageResult<StoredFile>;

    /// Reads the raw bytes of a stored file
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no regular file has that name.
    async fn retrieve(&self, filename: &str) -> StorageResult<Bytes>;

    /// Enumerates the stored files (non-recursive)
    ///
    /// An upload directory that was never created lists as empty.
    async fn list(&self) -> StorageResult<Vec<StoredFile>>;
}
