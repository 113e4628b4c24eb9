//! Download endpoint for stored uploads
//!
//! Serves the raw bytes of a stored file with a `Content-Type` guessed from
//! its extension and an `ETag` built from name and size. A matching
//! `If-None-Match` is answered with 304 and no body.
//!
//! A file that does not exist (or a name that could never be stored) is
//! answered with an empty 200 unless `downloads.not_found_status` is set, in
//! which case it is a 404.

use crate::error::AppError;
use crate::state::AppState;
use crate::storage::StorageError;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// `GET /uploads/{name}`
///
/// # Errors
///
/// - [`AppError::NotFound`] for a missing file when `not_found_status` is enabled
/// - [`AppError::Storage`] when the file exists but cannot be read
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let data = match state.storage().retrieve(&name).await {
        Ok(data) => data,
        Err(StorageError::NotFound(_) | StorageError::InvalidPath(_)) => {
            tracing::debug!(file = %name, "download of missing file");
            if state.config().downloads.not_found_status {
                return Err(AppError::NotFound(name));
            }
            return Ok(StatusCode::OK.into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let etag = entity_tag(&name, data.len());

    // Check If-None-Match (ETag validation)
    if let Some(if_none_match) = headers.get(IF_NONE_MATCH) {
        if if_none_match.to_str().is_ok_and(|v| v == etag) {
            return Ok(StatusCode::NOT_MODIFIED.into_response());
        }
    }

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    Ok(build_file_response(data, &etag, &content_type))
}

/// Strong entity tag: `"<name>-<len>"`
fn entity_tag(name: &str, len: usize) -> String {
    format!(r#""{name}-{len}""#)
}

fn build_file_response(data: Bytes, etag: &str, content_type: &str) -> Response {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, data.len())
        .header(CACHE_CONTROL, "no-cache");

    // Names that are not valid header text simply go without an ETag
    if let Ok(value) = HeaderValue::from_str(etag) {
        response = response.header(ETAG, value);
    }

    response
        .body(Body::from(data))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
