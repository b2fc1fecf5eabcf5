//! HTTP error mapping
//!
//! Every failure body is `{"error": "<message>"}`. Store failures are logged
//! with their detail and answered with the operation's generic message only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request field (400)
    #[error("{0}")]
    BadRequest(String),

    /// Update/delete target does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Store failure; the message is the generic operation failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Classify a core error, using `failure` as the 500 message
    pub fn from_common(err: amgr_common::Error, failure: &str) -> Self {
        match err {
            amgr_common::Error::Validation(msg) => ApiError::BadRequest(msg),
            amgr_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => {
                error!("{}: {}", failure, other);
                ApiError::Internal(failure.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Attach the operation's generic failure message to a core result
pub trait OrFailure<T> {
    fn or_failure(self, failure: &str) -> ApiResult<T>;
}

impl<T> OrFailure<T> for amgr_common::Result<T> {
    fn or_failure(self, failure: &str) -> ApiResult<T> {
        self.map_err(|e| ApiError::from_common(e, failure))
    }
}
