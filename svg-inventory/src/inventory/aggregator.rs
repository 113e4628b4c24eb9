//! Per-file record assembly

use super::record::{size_in_kb, InventoryRecord, ShapeCounts};
use crate::storage::StoredFile;
use crate::validator::{ShapeKind, StructuralValidator, ValidatorError};

/// Builds an [`InventoryRecord`] for a validated document
#[derive(Debug, Clone)]
pub struct InventoryAggregator {
    public_prefix: String,
}

impl InventoryAggregator {
    /// Creates an aggregator that reports names under `public_prefix`
    ///
    /// With prefix `"uploads"`, `a.svg` is reported as `uploads/a.svg`. An
    /// empty prefix reports the bare filename.
    #[must_use]
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            public_prefix: public_prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Storage-relative path reported for a file
    #[must_use]
    pub fn display_name(&self, filename: &str) -> String {
        if self.public_prefix.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{filename}", self.public_prefix)
        }
    }

    /// Collects size and one count per shape kind
    ///
    /// Must only be called for documents that passed validation. The size is
    /// taken from `document`, the bytes that were validated and counted, not
    /// from the enumeration snapshot in `file`.
    pub fn record(
        &self,
        validator: &dyn StructuralValidator,
        file: &StoredFile,
        document: &[u8],
    ) -> Result<InventoryRecord, ValidatorError> {
        let mut shapes = ShapeCounts::default();
        for kind in ShapeKind::ALL {
            shapes.set(kind, validator.count(kind, document)?);
        }

        Ok(InventoryRecord {
            file_name: self.display_name(&file.filename),
            file_size: size_in_kb(document.len() as u64),
            shapes,
        })
    }
}
