//! # Reservation Routes
//!
//! ```text
//! GET      /api/v1/inventory?id=   snapshot (all units, or the one with id)
//! GET|POST /api/v1/reserve?id=     Available → Reserved
//!                                  400 no id │ 404 unknown │ 409 already reserved
//! ```

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::AppQuery;
use crate::state::AppState;
use shelf_core::InventoryUnit;

#[derive(Debug, Deserialize)]
pub struct UnitParams {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    pub message: String,
    pub unit: InventoryUnit,
}

pub async fn list_inventory(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UnitParams>,
) -> Json<Vec<InventoryUnit>> {
    Json(state.catalog.inventory(params.id.as_deref()))
}

pub async fn reserve(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UnitParams>,
) -> ApiResult<Json<ReserveResponse>> {
    let unit = state.catalog.reserve(params.id.as_deref().unwrap_or_default())?;
    Ok(Json(ReserveResponse {
        message: "Reserved successfully".to_string(),
        unit,
    }))
}
