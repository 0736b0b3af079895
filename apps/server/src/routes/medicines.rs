//! Medicine CRUD handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use galen_core::Medicine;
use galen_store::{MedicineUpdate, MedicineWithSupplier, NewMedicine};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/medicines", get(list).post(create))
        .route(
            "/api/medicines/{id}",
            get(get_one).put(update).delete(delete),
        )
}

/// List all medicines with their supplier names.
async fn list(State(state): State<AppState>) -> Json<Vec<MedicineWithSupplier>> {
    Json(state.store.medicines().list())
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Medicine>> {
    Ok(Json(state.store.medicines().get(id)?))
}

/// Create a medicine. The starting quantity is recorded as an `IN` stock
/// transaction so the ledger opens with the full balance.
async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewMedicine>,
) -> ApiResult<Json<Medicine>> {
    Ok(Json(state.store.medicines().create(body)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<MedicineUpdate>,
) -> ApiResult<Json<Medicine>> {
    Ok(Json(state.store.medicines().update(id, body)?))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.store.medicines().delete(id)?;
    Ok(Json(json!({ "deleted": id })))
}
