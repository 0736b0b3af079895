//! # Galen Server
//!
//! REST API server library. `main.rs` wires configuration, the store and
//! the listener; everything else lives here so integration tests can
//! build the exact router the binary serves.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use galen_store::NewUser;

use crate::error::ApiError;
use crate::state::AppState;

/// Username of the account seeded into an empty store.
pub const BOOTSTRAP_USERNAME: &str = "admin";
/// Its initial password. Expected to be changed after first login.
pub const BOOTSTRAP_PASSWORD: &str = "admin123";

/// Build the application router with tracing and permissive CORS.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Seed the default admin account when the store has no users at all.
pub fn bootstrap_admin(store: &galen_store::Store) -> Result<(), ApiError> {
    if store.users().count() > 0 {
        return Ok(());
    }

    let password_hash = auth::hash_password(BOOTSTRAP_PASSWORD)?;
    store.users().create(NewUser {
        username: BOOTSTRAP_USERNAME.to_string(),
        password_hash,
        role: Some(galen_core::Role::Admin),
        email: None,
    })?;

    info!(username = BOOTSTRAP_USERNAME, "Seeded default admin account");
    Ok(())
}
