//! Error types and HTTP error responses
//!
//! Every handler returns [`AppError`] on failure. Client errors carry a
//! message that is safe to show; server errors are logged in full and answered
//! with a generic message so I/O details never reach the client.

use crate::extractors::FileUploadError;
use crate::inventory::InventoryError;
use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// The upload request carried no file
    #[error("No files were uploaded.")]
    MissingUpload,

    /// The upload request was malformed or over a limit
    #[error(transparent)]
    Upload(FileUploadError),

    /// The client-supplied filename cannot be used
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Writing the upload to storage failed
    #[error("Failed to store {filename}: {source}")]
    WriteFailure {
        /// Name the client uploaded under
        filename: String,
        /// Underlying storage failure
        #[source]
        source: StorageError,
    },

    /// Requested file does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Building the inventory listing failed
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Storage failure outside of an upload
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable error code
    pub code: &'static str,
}

impl AppError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingUpload | Self::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            Self::Upload(err) => err.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Inventory(InventoryError::Timeout(_) | InventoryError::Unavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::WriteFailure { .. }
            | Self::Inventory(InventoryError::Storage(_))
            | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingUpload => "missing_upload",
            Self::Upload(_) => "invalid_upload",
            Self::InvalidFileName(_) => "invalid_file_name",
            Self::WriteFailure { .. } => "write_failure",
            Self::NotFound(_) => "not_found",
            Self::Inventory(InventoryError::Timeout(_)) => "scan_timeout",
            Self::Inventory(InventoryError::Unavailable) => "unavailable",
            Self::Inventory(InventoryError::Storage(_)) | Self::Storage(_) => "storage_error",
        }
    }

    /// Message that is safe to send to the client
    fn public_message(&self) -> String {
        match self {
            Self::WriteFailure { filename, .. } => format!("Failed to store {filename}"),
            Self::Inventory(InventoryError::Storage(_)) | Self::Storage(_) => {
                "Storage is unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<FileUploadError> for AppError {
    fn from(err: FileUploadError) -> Self {
        match err {
            FileUploadError::MissingFile => Self::MissingUpload,
            other => Self::Upload(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "request rejected");
        }

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}
