//! Stock ledger handlers.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use galen_core::{Medicine, StockTransaction};
use galen_store::{StockReceipt, StockWithMedicine};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stock", get(list))
        .route("/api/stock/receive", post(receive))
        .route("/api/stock/low", get(low))
}

/// The full movement ledger, newest entries last.
async fn list(State(state): State<AppState>) -> Json<Vec<StockWithMedicine>> {
    Json(state.store.stock().list())
}

/// Record an inbound delivery and bump the medicine's on-hand quantity.
async fn receive(
    State(state): State<AppState>,
    Json(body): Json<StockReceipt>,
) -> ApiResult<Json<StockTransaction>> {
    Ok(Json(state.store.stock().receive(body)?))
}

/// Medicines below the reorder threshold.
async fn low(State(state): State<AppState>) -> Json<Vec<Medicine>> {
    Json(state.store.medicines().low_stock())
}
