//! # HTTP Routes
//!
//! One module per resource, each exposing a `router()` merged into the
//! application router in `main`.
//!
//! ```text
//! /api/auth/login            POST
//! /api/auth/register         POST
//! /api/medicines             GET POST      /{id} GET PUT DELETE
//! /api/stock                 GET           /receive POST   /low GET
//! /api/customers             GET POST      /{id} GET PUT DELETE  /{id}/history GET
//! /api/suppliers             GET POST      /{id} GET PUT DELETE
//! /api/sales                 GET POST      /{id} GET
//! /api/reports/dashboard     GET
//! /api/reports/sales         GET ?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
//! /api/reports/expiry        GET
//! ```

pub mod auth;
pub mod customers;
pub mod medicines;
pub mod reports;
pub mod sales;
pub mod stock;
pub mod suppliers;

use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(medicines::router())
        .merge(stock::router())
        .merge(customers::router())
        .merge(suppliers::router())
        .merge(sales::router())
        .merge(reports::router())
}
