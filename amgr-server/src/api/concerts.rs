//! Concert endpoints
//!
//! Creating a concert also records a "New concert scheduled" entry in the
//! activity feed shown on the dashboard.

use amgr_common::db::{concerts, Concert, ConcertForm};
use axum::{extract::State, http::StatusCode, routing::{get, put}, Json, Router};
use serde::Serialize;
use tracing::info;

use super::{EntityId, JsonForm, MessageResponse};
use crate::error::{ApiResult, OrFailure};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ConcertCreated {
    pub message: String,
    pub concert_id: i64,
}

pub async fn list_concerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Concert>>> {
    let concerts = concerts::list_concerts(&state.db)
        .await
        .or_failure("Failed to fetch concerts")?;
    Ok(Json(concerts))
}

pub async fn create_concert(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ConcertForm>,
) -> ApiResult<(StatusCode, Json<ConcertCreated>)> {
    let (concert_id, concert) = concerts::create_concert(&state.db, &form)
        .await
        .or_failure("Failed to add concert")?;

    info!("Concert added: {}", concert.concert_name);
    Ok((
        StatusCode::CREATED,
        Json(ConcertCreated {
            message: "Concert added successfully".to_string(),
            concert_id,
        }),
    ))
}

pub async fn update_concert(
    State(state): State<AppState>,
    EntityId(concert_id): EntityId,
    JsonForm(form): JsonForm<ConcertForm>,
) -> ApiResult<Json<MessageResponse>> {
    concerts::update_concert(&state.db, concert_id, &form)
        .await
        .or_failure("Failed to update concert")?;

    info!("Concert updated: ID {}", concert_id);
    Ok(MessageResponse::new("Concert updated successfully"))
}

pub async fn delete_concert(
    State(state): State<AppState>,
    EntityId(concert_id): EntityId,
) -> ApiResult<Json<MessageResponse>> {
    concerts::delete_concert(&state.db, concert_id)
        .await
        .or_failure("Failed to delete concert")?;

    info!("Concert deleted: ID {}", concert_id);
    Ok(MessageResponse::new("Concert deleted successfully"))
}

pub fn concert_routes() -> Router<AppState> {
    Router::new()
        .route("/api/concerts", get(list_concerts).post(create_concert))
        .route("/api/concerts/:id", put(update_concert).delete(delete_concert))
}
