//! HTTP handlers
//!
//! Handlers are thin: they pull what they need out of [`AppState`](crate::state::AppState),
//! call into storage or the inventory service and map failures to
//! [`AppError`](crate::error::AppError).

pub mod download;
pub mod health;
pub mod inventory;
pub mod upload;

pub use download::serve_upload;
pub use health::health_check;
pub use inventory::list_inventory;
pub use upload::upload_file;
