//! Customer CRUD and purchase history handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use galen_core::Customer;
use galen_store::{CustomerSaleHistory, CustomerUpdate, NewCustomer};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list).post(create))
        .route(
            "/api/customers/{id}",
            get(get_one).put(update).delete(delete),
        )
        .route("/api/customers/{id}/history", get(history))
}

async fn list(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.store.customers().list())
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.customers().get(id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewCustomer>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.customers().create(body)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<CustomerUpdate>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.customers().update(id, body)?))
}

/// Delete the customer record. Past sales keep their customer id and show
/// a null name afterwards.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.store.customers().delete(id)?;
    Ok(Json(json!({ "deleted": id })))
}

/// Sales made to this customer, each with its medicine names.
async fn history(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<Vec<CustomerSaleHistory>> {
    Json(state.store.customers().history(id))
}
