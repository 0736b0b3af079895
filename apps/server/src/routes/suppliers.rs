//! Supplier CRUD handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use galen_core::Supplier;
use galen_store::{NewSupplier, SupplierUpdate};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/suppliers", get(list).post(create))
        .route(
            "/api/suppliers/{id}",
            get(get_one).put(update).delete(delete),
        )
}

async fn list(State(state): State<AppState>) -> Json<Vec<Supplier>> {
    Json(state.store.suppliers().list())
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.store.suppliers().get(id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewSupplier>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.store.suppliers().create(body)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<SupplierUpdate>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.store.suppliers().update(id, body)?))
}

/// Delete the supplier record. Medicines keep their supplier id and show
/// a null supplier name afterwards.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.store.suppliers().delete(id)?;
    Ok(Json(json!({ "deleted": id })))
}
