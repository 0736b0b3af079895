//! Shared application state.

use galen_store::Store;

use crate::config::ServerConfig;

/// State handed to every handler. `Store` is already an `Arc` internally,
/// so cloning this per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: ServerConfig,
}
