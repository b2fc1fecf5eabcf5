//! HTTP API handlers
//!
//! Request bodies and path ids go through [`JsonForm`] and [`EntityId`] so
//! that malformed input is answered with the same `{"error": ...}` body as
//! every other failure.

pub mod albums;
pub mod artists;
pub mod concerts;
pub mod contracts;
pub mod dashboard;
pub mod health;

pub use albums::album_routes;
pub use artists::artist_routes;
pub use concerts::concert_routes;
pub use contracts::contract_routes;
pub use dashboard::dashboard_routes;
pub use health::health_routes;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ApiError;

/// Body of successful update/delete responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// JSON request body with rejections mapped to 400 `{"error": ...}`
pub struct JsonForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Numeric `:id` path segment
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(_) => Err(ApiError::BadRequest("Invalid id".to_string())),
        }
    }
}
