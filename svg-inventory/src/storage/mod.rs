//! Upload storage abstraction and implementations
//!
//! Uploaded files live in a single flat namespace keyed by filename. The
//! [`FileStorage`] trait hides where that namespace lives so the inventory
//! pipeline and the HTTP handlers never touch the filesystem directly:
//! - [`LocalFileStorage`] keeps files in one directory on disk
//! - [`MemoryFileStorage`] keeps files in memory (tests, ephemeral deployments)
//!
//! # Examples
//!
//! ```rust,no_run
//! use svg_inventory::storage::{FileStorage, LocalFileStorage, UploadedFile};
//! use std::path::PathBuf;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let storage = LocalFileStorage::new(PathBuf::from("./uploads"))?;
//!
//! let uploaded = UploadedFile::new("logo.svg", "image/svg+xml", &b"<svg/>"[..]);
//! let stored = storage.store(uploaded).await?;
//! println!("Stored file: {stored}");
//!
//! for file in storage.list().await? {
//!     println!("{} ({} bytes)", file.filename, file.size);
//! }
//! # Ok(())
//! # }
//! ```

mod local;
mod memory;
mod traits;
mod types;

pub use local::LocalFileStorage;
pub use memory::MemoryFileStorage;
#[cfg(test)]
pub use traits::MockFileStorage;
pub use traits::FileStorage;
pub use types::{validate_filename, StorageError, StorageResult, StoredFile, UploadedFile};
