//! Error types for the HTTP API.
//!
//! Every handler returns `ApiResult<T>`; the error half renders as a JSON
//! body of the form `{"error": "<message>"}` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use galen_core::CoreError;
use galen_store::StoreError;

/// API errors, one variant per HTTP status the server produces.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} {} not found", entity, id))
            }
            StoreError::Duplicate { .. } => ApiError::BadRequest(error.to_string()),
            StoreError::Core(core) => ApiError::from(core),
            // Persistence failures must not leak paths or serde detail.
            StoreError::Io(e) => {
                error!(?e, "Snapshot I/O failure");
                ApiError::Internal("Internal server error".to_string())
            }
            StoreError::Corrupt(e) => {
                error!(?e, "Snapshot corrupt");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MedicineNotFound(id) => {
                ApiError::NotFound(format!("Medicine {} not found", id))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
