//! Reporting handlers: dashboard, sales range, expiry watchlist.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use galen_core::{Medicine, Sale};
use galen_store::DashboardStats;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reports/dashboard", get(dashboard))
        .route("/api/reports/sales", get(sales))
        .route("/api/reports/expiry", get(expiry))
}

/// Counts and today's revenue for the dashboard cards.
async fn dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.store.reports().dashboard(Utc::now().date_naive()))
}

#[derive(Debug, Deserialize)]
struct SalesRange {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

/// Sales within an inclusive date range; both bounds are optional.
async fn sales(
    State(state): State<AppState>,
    Query(range): Query<SalesRange>,
) -> Json<Vec<Sale>> {
    Json(
        state
            .store
            .reports()
            .sales_between(range.start_date, range.end_date),
    )
}

/// Medicines expiring within the watch window.
async fn expiry(State(state): State<AppState>) -> Json<Vec<Medicine>> {
    Json(state.store.reports().expiring(Utc::now().date_naive()))
}
