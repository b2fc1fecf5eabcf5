//! Artist endpoints
//!
//! - `GET /api/artists`
//! - `POST /api/artists`
//! - `PUT /api/artists/:id`
//! - `DELETE /api/artists/:id`

use amgr_common::db::{artists, Artist, ArtistForm};
use axum::{extract::State, http::StatusCode, routing::{get, put}, Json, Router};
use serde::Serialize;
use tracing::info;

use super::{EntityId, JsonForm, MessageResponse};
use crate::error::{ApiResult, OrFailure};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ArtistCreated {
    pub message: String,
    pub artist_id: i64,
}

/// GET /api/artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<Artist>>> {
    let artists = artists::list_artists(&state.db)
        .await
        .or_failure("Failed to fetch artists")?;
    Ok(Json(artists))
}

/// POST /api/artists
///
/// **Errors:** 400 when `first_name` or `stage_name` is missing.
pub async fn create_artist(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ArtistForm>,
) -> ApiResult<(StatusCode, Json<ArtistCreated>)> {
    let (artist_id, artist) = artists::create_artist(&state.db, &form)
        .await
        .or_failure("Failed to add artist")?;

    info!("Artist added: {}", artist.stage_name);
    Ok((
        StatusCode::CREATED,
        Json(ArtistCreated {
            message: "Artist added successfully".to_string(),
            artist_id,
        }),
    ))
}

/// PUT /api/artists/:id (full replace)
pub async fn update_artist(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
    JsonForm(form): JsonForm<ArtistForm>,
) -> ApiResult<Json<MessageResponse>> {
    let artist = artists::update_artist(&state.db, artist_id, &form)
        .await
        .or_failure("Failed to update artist")?;

    info!("Artist updated: {}", artist.stage_name);
    Ok(MessageResponse::new("Artist updated successfully"))
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
) -> ApiResult<Json<MessageResponse>> {
    artists::delete_artist(&state.db, artist_id)
        .await
        .or_failure("Failed to delete artist")?;

    info!("Artist deleted: ID {}", artist_id);
    Ok(MessageResponse::new("Artist deleted successfully"))
}

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artists", get(list_artists).post(create_artist))
        .route("/api/artists/:id", put(update_artist).delete(delete_artist))
}
