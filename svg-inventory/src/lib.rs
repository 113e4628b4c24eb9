//! svg-inventory: upload SVG documents and list the structurally valid ones
//!
//! Clients upload arbitrary files over multipart `POST /upload`. They are
//! stored verbatim in a flat directory. `GET /inventory` re-scans that
//! directory on every request, validates each `.svg` file and answers with one
//! record per valid document: its name, its size in KB and how many
//! rectangles, circles, paths and groups it contains.
//!
//! # Architecture
//!
//! - [`storage`]: async [`FileStorage`](storage::FileStorage) trait with a
//!   local-directory backend and an in-memory backend
//! - [`validator`]: the [`StructuralValidator`](validator::StructuralValidator)
//!   seam and its `roxmltree`-based SVG implementation
//! - [`inventory`]: scan, screen, aggregate and assemble the listing off the
//!   request threads
//! - [`handlers`], [`extractors`], [`server`]: the HTTP surface
//! - [`config`], [`observability`], [`error`], [`state`]: ambient plumbing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use svg_inventory::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     svg_inventory::observability::init()?;
//!
//!     let config = AppConfig::load(None)?;
//!     let state = AppState::from_config(config)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, svg_inventory::server::router(state)).await?;
//!     Ok(())
//! }
//! ```

// Public modules (exported in public API)
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod inventory;
pub mod observability;
pub mod server;
pub mod state;
pub mod storage;
pub mod validator;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use svg_inventory::prelude::*;
    //! ```

    // Configuration and state
    pub use crate::config::AppConfig;
    pub use crate::state::AppState;

    // Error types
    pub use crate::error::AppError;

    // Extractors
    pub use crate::extractors::{FileUpload, FileUploadError};

    // Storage
    pub use crate::storage::{
        FileStorage, LocalFileStorage, MemoryFileStorage, StorageError, StoredFile, UploadedFile,
    };

    // Validation
    pub use crate::validator::{ShapeKind, StructuralValidator, SvgStructuralValidator};

    // Inventory
    pub use crate::inventory::{InventoryRecord, InventoryResponse, InventoryService};

    // Re-export key dependencies
    pub use axum;

    // Convenience for JSON responses
    pub use serde_json::json;
}
