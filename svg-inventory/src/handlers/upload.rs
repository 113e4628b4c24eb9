//! Upload endpoint
//!
//! Accepts a single file from a multipart form and writes it verbatim to
//! storage under the client-supplied name, replacing any file of the same
//! name. On success the client is sent back to the inventory view.

use crate::error::AppError;
use crate::extractors::FileUpload;
use crate::state::AppState;
use crate::storage::{validate_filename, StorageError};
use axum::{extract::State, response::Redirect};

/// `POST /upload`
///
/// # Errors
///
/// - [`AppError::MissingUpload`] when the form carries no file
/// - [`AppError::InvalidFileName`] when the name could escape the upload directory
/// - [`AppError::WriteFailure`] when storage rejects the write
pub async fn upload_file(
    State(state): State<AppState>,
    FileUpload(file): FileUpload,
) -> Result<Redirect, AppError> {
    let filename = file.filename.clone();
    validate_filename(&filename).map_err(|_| AppError::InvalidFileName(filename.clone()))?;

    let size = file.size();
    let content_type = file.content_type.clone();
    let stored = state.storage().store(file).await.map_err(|source| match source {
        StorageError::InvalidPath(_) => AppError::InvalidFileName(filename.clone()),
        source => AppError::WriteFailure { filename, source },
    })?;

    tracing::info!(file = %stored.filename, size, %content_type, "upload stored");
    Ok(Redirect::to(&state.config().upload.redirect_to))
}
