//! Axum extractors for svg-inventory

mod file_upload;

pub use file_upload::{FileUpload, FileUploadError};
