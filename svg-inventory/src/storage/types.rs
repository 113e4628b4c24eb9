//! Core types for upload storage

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// File not found in storage
    #[error("File not found: {0}")]
    NotFound(String),

    /// I/O error during storage operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Filename cannot be used as a storage key
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Checks that a client-supplied name is a plain file name
///
/// Storage is flat, so anything that could address another directory
/// (separators, `.`/`..`, NUL) is refused.
///
/// # Errors
///
/// Returns `StorageError::InvalidPath` describing the offending name.
///
/// # Examples
///
/// ```rust
/// use svg_inventory::storage::validate_filename;
///
/// assert!(validate_filename("drawing.svg").is_ok());
/// assert!(validate_filename("../etc/passwd").is_err());
/// assert!(validate_filename("").is_err());
/// ```
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(StorageError::InvalidPath(format!("{filename:?} is not a file name")));
    }

    if filename.contains(['/', '\\', '\0']) {
        return Err(StorageError::InvalidPath(format!(
            "{filename:?} must not contain path separators"
        )));
    }

    Ok(())
}

/// A file that has been uploaded but not yet stored
///
/// # Examples
///
/// ```rust
/// use svg_inventory::storage::UploadedFile;
///
/// let file = UploadedFile::new("drawing.svg", "image/svg+xml", &b"<svg/>"[..]);
/// assert_eq!(file.size(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename supplied by the client
    pub filename: String,

    /// MIME content type declared by the client
    pub content_type: String,

    /// File data as bytes
    pub data: Bytes,
}

impl UploadedFile {
    /// Creates a new uploaded file
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Returns the size of the file in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A file held by a storage backend
///
/// The filename is the only identifier; the bytes are read separately via
/// [`FileStorage::retrieve`](super::FileStorage::retrieve).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredFile {
    /// Filename, unique within the storage backend
    pub filename: String,

    /// File size in bytes
    pub size: u64,
}

impl StoredFile {
    /// Creates a new stored file record
    #[must_use]
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
        }
    }

    /// Extracts the file extension from the filename
    ///
    /// Returns `None` if the filename has no `.`. The comparison callers make
    /// against the result is case-sensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use svg_inventory::storage::StoredFile;
    ///
    /// assert_eq!(StoredFile::new("logo.svg", 0).extension(), Some("svg"));
    /// assert_eq!(StoredFile::new("archive.tar.gz", 0).extension(), Some("gz"));
    /// assert_eq!(StoredFile::new("README", 0).extension(), None);
    /// ```
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.filename.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for StoredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoredFile(filename={}, size={})", self.filename, self.size)
    }
}
