//! Authentication handlers: login and registration.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use galen_core::Role;
use galen_store::NewUser;

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
}

impl From<galen_core::User> for UserResponse {
    fn from(user: galen_core::User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            role: user.role,
            email: user.email,
        }
    }
}

/// Verify credentials and return the account.
///
/// Unknown usernames and wrong passwords produce the same response so the
/// endpoint cannot be used to enumerate accounts.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.store.users().find_by_username(&body.username);

    match user {
        Some(user) if verify_password(&body.password, &user.password_hash) => {
            info!(username = %user.username, "Login succeeded");
            Ok(Json(user.into()))
        }
        _ => {
            warn!(username = %body.username, "Login failed");
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}

/// Create a new account.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    galen_core::validation::validate_password(&body.password)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = hash_password(&body.password)?;
    let user = state.store.users().create(NewUser {
        username: body.username,
        password_hash,
        role: body.role,
        email: body.email,
    })?;

    Ok(Json(user.into()))
}
