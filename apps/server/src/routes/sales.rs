//! Sale handlers: the sale transaction and its read views.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use galen_core::Money;
use galen_store::{NewSale, SaleDetail, SaleSummary};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales", get(list).post(create))
        .route("/api/sales/{id}", get(get_one))
}

/// Receipt returned after a committed sale.
#[derive(Debug, Serialize)]
pub struct SaleReceipt {
    pub id: u64,
    pub total_cents: Money,
    pub final_cents: Money,
}

async fn list(State(state): State<AppState>) -> Json<Vec<SaleSummary>> {
    Json(state.store.sales().list())
}

/// Commit a sale. All lines are validated against live stock first; a sale
/// either fully applies or nothing is recorded.
async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewSale>,
) -> ApiResult<Json<SaleReceipt>> {
    let sale = state.store.sales().create(body)?;
    Ok(Json(SaleReceipt {
        id: sale.id,
        total_cents: sale.total_cents,
        final_cents: sale.final_cents,
    }))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<SaleDetail>> {
    Ok(Json(state.store.sales().get(id)?))
}
