//! Storage enumeration and candidate screening

use super::InventoryResult;
use crate::storage::{FileStorage, StorageResult, StoredFile};
use crate::validator::{StructuralValidator, ValidatorError};
use bytes::Bytes;
use std::sync::Arc;

/// Extension a stored file must carry (compared case-sensitively)
pub const CANDIDATE_EXTENSION: &str = "svg";

/// Returns true if the file qualifies for validation
///
/// # Examples
///
/// ```rust
/// use svg_inventory::inventory::is_candidate;
/// use svg_inventory::storage::StoredFile;
///
/// assert!(is_candidate(&StoredFile::new("a.svg", 10)));
/// assert!(!is_candidate(&StoredFile::new("a.SVG", 10)));
/// assert!(!is_candidate(&StoredFile::new("b.txt", 10)));
/// ```
#[must_use]
pub fn is_candidate(file: &StoredFile) -> bool {
    file.extension() == Some(CANDIDATE_EXTENSION)
}

/// Enumerates storage and loads candidate documents
#[derive(Clone)]
pub struct DirectoryScanner {
    storage: Arc<dyn FileStorage>,
}

impl DirectoryScanner {
    /// Creates a scanner over a storage backend
    #[must_use]
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }

    /// Lists the stored files that qualify for validation, in storage order
    ///
    /// Files with any other extension are dropped here and only logged.
    pub async fn candidates(&self) -> InventoryResult<Vec<StoredFile>> {
        let files = self.storage.list().await?;
        let total = files.len();

        let candidates: Vec<StoredFile> = files
            .into_iter()
            .filter(|file| {
                let keep = is_candidate(file);
                if !keep {
                    tracing::info!(
                        file = %file.filename,
                        "not an svg file, excluded from inventory"
                    );
                }
                keep
            })
            .collect();

        tracing::debug!(total, candidates = candidates.len(), "enumerated storage");
        Ok(candidates)
    }

    /// Reads a candidate's bytes
    pub async fn load(&self, file: &StoredFile) -> StorageResult<Bytes> {
        self.storage.retrieve(&file.filename).await
    }
}

/// Runs structural validation on a loaded candidate
///
/// A failing verdict is logged and reported as `Ok(false)`; it never reaches
/// the client.
pub fn screen(
    validator: &dyn StructuralValidator,
    file: &StoredFile,
    document: &[u8],
) -> Result<bool, ValidatorError> {
    let valid = validator.validate(document)?;
    if !valid {
        tracing::info!(
            file = %file.filename,
            validator = validator.name(),
            "failed structural validation, excluded from inventory"
        );
    }
    Ok(valid)
}
