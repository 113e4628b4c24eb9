//! Inventory listing endpoint

use crate::error::AppError;
use crate::inventory::InventoryResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

/// `GET /inventory` (also mounted at `GET /fileInfo`)
///
/// Re-scans storage on every call. Files that are not `.svg` or fail
/// validation are left out of the listing without an error.
///
/// # Errors
///
/// Fails only when storage cannot be enumerated or the scan times out.
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>, AppError> {
    let response = state.inventory().build().await?;
    Ok(Json(response))
}
