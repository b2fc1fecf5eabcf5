//! Album endpoints

use amgr_common::db::{albums, Album, AlbumForm};
use axum::{extract::State, http::StatusCode, routing::{get, put}, Json, Router};
use serde::Serialize;
use tracing::info;

use super::{EntityId, JsonForm, MessageResponse};
use crate::error::{ApiResult, OrFailure};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AlbumCreated {
    pub message: String,
    pub album_id: i64,
}

/// GET /api/albums
///
/// Each album carries its artist's stage name as `artist_name`.
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<Json<Vec<Album>>> {
    let albums = albums::list_albums(&state.db)
        .await
        .or_failure("Failed to fetch albums")?;
    Ok(Json(albums))
}

/// POST /api/albums
pub async fn create_album(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<AlbumForm>,
) -> ApiResult<(StatusCode, Json<AlbumCreated>)> {
    let (album_id, album) = albums::create_album(&state.db, &form)
        .await
        .or_failure("Failed to add album")?;

    info!("Album added: {} (artist {})", album.title, album.artist_id);
    Ok((
        StatusCode::CREATED,
        Json(AlbumCreated {
            message: "Album added successfully".to_string(),
            album_id,
        }),
    ))
}

/// PUT /api/albums/:id
pub async fn update_album(
    State(state): State<AppState>,
    EntityId(album_id): EntityId,
    JsonForm(form): JsonForm<AlbumForm>,
) -> ApiResult<Json<MessageResponse>> {
    albums::update_album(&state.db, album_id, &form)
        .await
        .or_failure("Failed to update album")?;

    info!("Album updated: ID {}", album_id);
    Ok(MessageResponse::new("Album updated successfully"))
}

/// DELETE /api/albums/:id
pub async fn delete_album(
    State(state): State<AppState>,
    EntityId(album_id): EntityId,
) -> ApiResult<Json<MessageResponse>> {
    albums::delete_album(&state.db, album_id)
        .await
        .or_failure("Failed to delete album")?;

    info!("Album deleted: ID {}", album_id);
    Ok(MessageResponse::new("Album deleted successfully"))
}

pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/api/albums", get(list_albums).post(create_album))
        .route("/api/albums/:id", put(update_album).delete(delete_album))
}
