//! Local filesystem storage implementation

use super::traits::FileStorage;
use super::types::{validate_filename, StorageError, StorageResult, StoredFile, UploadedFile};
use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage backend
///
/// Stores every upload directly in one directory under its client-supplied
/// name. There are no subdirectories and no metadata files, so the directory
/// can be populated or inspected by hand.
///
/// # Directory Structure
///
/// ```text
/// ./uploads/
/// ├── a.svg
/// ├── b.txt
/// └── c.svg
/// ```
///
/// # Examples
///
/// ```rust,no_run
/// use svg_inventory::storage::{LocalFileStorage, FileStorage, UploadedFile};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let storage = LocalFileStorage::new(PathBuf::from("./uploads"))?;
///
/// let file = UploadedFile::new("a.svg", "image/svg+xml", &b"<svg/>"[..]);
/// storage.store(file).await?;
///
/// // File is now at: ./uploads/a.svg
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Directory holding the uploads
    base_path: PathBuf,
}

impl LocalFileStorage {
    /// Creates a new local file storage instance
    ///
    /// The directory does not have to exist yet; it is created on the first
    /// upload.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` if the base path exists but is not
    /// a directory.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use svg_inventory::storage::LocalFileStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = LocalFileStorage::new(PathBuf::from("./uploads"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        // Synchronous check is OK for initialization
        if base_path.exists() && !base_path.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "{} is not a directory",
                base_path.display()
            )));
        }

        Ok(Self { base_path })
    }

    /// Returns the upload directory
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Gets the full filesystem path for a filename
    fn get_file_path(&self, filename: &str) -> StorageResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.base_path.join(filename))
    }

    /// Ensures the storage directory exists
    async fn ensure_directory(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

/// Maps a missing file to `NotFound`, everything else to `Io`
fn not_found_or_io(filename: &str, err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(filename.to_string())
    } else {
        StorageError::Io(err)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, file: UploadedFile) -> StorageResult<StoredFile> {
        let file_path = self.get_file_path(&file.filename)?;
        self.ensure_directory().await?;

        // Truncates an existing file of the same name
        let mut f = fs::File::create(&file_path).await?;
        f.write_all(&file.data).await?;
        f.flush().await?;

        tracing::debug!(
            path = %file_path.display(),
            size = file.size(),
            "wrote upload to disk"
        );

        Ok(StoredFile::new(file.filename.clone(), file.size()))
    }

    async fn retrieve(&self, filename: &str) -> StorageResult<Bytes> {
        let file_path = self.get_file_path(filename)?;
        let metadata = fs::metadata(&file_path)
            .await
            .map_err(|e| not_found_or_io(filename, e))?;

        // Only regular files count as stored
        if !metadata.is_file() {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let data = fs::read(&file_path)
            .await
            .map_err(|e| not_found_or_io(filename, e))?;
        Ok(Bytes::from(data))
    }

    async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(metadata) = entry.metadata().await else {
                // Removed between read_dir and stat
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(filename) => files.push(StoredFile::new(filename, metadata.len())),
                Err(raw) => {
                    tracing::debug!(name = ?raw, "skipping non UTF-8 filename");
                }
            }
        }

        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }

}
