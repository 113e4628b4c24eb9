//! Inventory pipeline: scan, validate, aggregate, assemble
//!
//! ```text
//! FileStorage::list ──► DirectoryScanner ──► StructuralValidator ──► InventoryAggregator ──► InventoryResponse
//!                       (extension "svg")    (validate, 4× count)    (size KB + counts)     { "info": [...] }
//! ```
//!
//! A stored file produces a record iff its extension is exactly `svg` and the
//! validator accepts it. Everything else is excluded silently (logged only).

mod aggregator;
mod record;
mod scanner;
mod service;

pub use aggregator::InventoryAggregator;
pub use record::{size_in_kb, InventoryRecord, InventoryResponse, ShapeCounts};
pub use scanner::{is_candidate, screen, DirectoryScanner, CANDIDATE_EXTENSION};
pub use service::InventoryService;

use crate::storage::StorageError;
use std::time::Duration;
use thiserror::Error;

/// Errors that fail a whole inventory listing
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Storage could not be enumerated
    #[error("storage enumeration failed: {0}")]
    Storage(#[from] StorageError),

    /// The scan did not finish in time
    #[error("inventory scan exceeded {0:?}")]
    Timeout(Duration),

    /// The scan limiter has been shut down
    #[error("inventory service unavailable")]
    Unavailable,
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;
