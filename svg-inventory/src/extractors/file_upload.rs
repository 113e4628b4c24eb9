//! File upload extractor for multipart form data
//!
//! [`FileUpload`] pulls exactly one file out of a `multipart/form-data`
//! request. The file may arrive under any field name; non-file fields and
//! file fields with an empty filename (a form submitted with nothing chosen)
//! are skipped. Data is read chunk by chunk and the configured size limit is
//! enforced while reading.
//!
//! # Examples
//!
//! ```rust,no_run
//! use svg_inventory::extractors::FileUpload;
//! use axum::response::IntoResponse;
//!
//! async fn handler(FileUpload(file): FileUpload) -> impl IntoResponse {
//!     format!("Received: {} ({} bytes)", file.filename, file.size())
//! }
//! ```

use crate::error::AppError;
use crate::state::AppState;
use crate::storage::UploadedFile;
use axum::{
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::StatusCode,
};
use bytes::BytesMut;
use thiserror::Error;

/// Error types for file upload operations
#[derive(Debug, Error)]
pub enum FileUploadError {
    /// No file in the request (or the request is not multipart at all)
    #[error("No file found in upload")]
    MissingFile,

    /// More than one file when a single file is expected
    #[error("Multiple files found, expected single file")]
    MultipleFiles,

    /// Failed to read multipart data
    #[error("Multipart error: {0}")]
    MultipartError(String),

    /// File size exceeds the configured maximum
    #[error("File exceeds maximum of {max} bytes")]
    FileTooLarge {
        /// Maximum allowed
        max: usize,
    },
}

impl FileUploadError {
    /// HTTP status for this rejection
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MissingFile | Self::MultipleFiles | Self::MultipartError(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn from_multipart(err: &axum::extract::multipart::MultipartError, max: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::FileTooLarge { max }
        } else {
            Self::MultipartError(err.body_text())
        }
    }
}

/// Extractor for a single uploaded file
///
/// Rejects with [`AppError::MissingUpload`] when no file is present.
#[derive(Debug)]
pub struct FileUpload(pub UploadedFile);

impl FromRequest<AppState> for FileUpload {
    type Rejection = AppError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let max_size = state.config().upload.max_file_size;
        async move {
            let mut multipart = Multipart::from_request(req, &())
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "upload is not a multipart request");
                    FileUploadError::MissingFile
                })?;

            let mut files = Vec::new();

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| FileUploadError::from_multipart(&e, max_size))?
            {
                // Skip non-file fields and empty file inputs
                let Some(filename) = field.file_name().filter(|n| !n.is_empty()) else {
                    continue;
                };
                let filename = filename.to_string();

                if !files.is_empty() {
                    return Err(AppError::from(FileUploadError::MultipleFiles));
                }

                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = read_field_data(field, max_size).await?;

                files.push(UploadedFile::new(filename, content_type, data));
            }

            files.pop().map(Self).ok_or(AppError::MissingUpload)
        }
    }
}

/// Reads field data with size limit enforcement
///
/// Stops as soon as the limit is crossed instead of buffering the whole field.
async fn read_field_data(
    mut field: Field<'_>,
    max_size: usize,
) -> Result<bytes::Bytes, FileUploadError> {
    let mut data = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| FileUploadError::from_multipart(&e, max_size))?
    {
        if data.len() + chunk.len() > max_size {
            return Err(FileUploadError::FileTooLarge { max: max_size });
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data.freeze())
}
