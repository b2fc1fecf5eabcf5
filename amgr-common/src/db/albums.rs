//! Album repository operations

use crate::input::{self, FormValue};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Album with its owning artist's display name
///
/// `artist_name` and `artist_id` come from an outer join and are `None` when
/// the album's artist no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Album {
    pub album_id: i64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub total_tracks: Option<i64>,
    pub artist_name: Option<String>,
    pub artist_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumForm {
    pub title: Option<FormValue>,
    pub release_date: Option<FormValue>,
    pub total_tracks: Option<FormValue>,
    pub artist_id: Option<FormValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub total_tracks: Option<i64>,
    pub artist_id: i64,
}

impl AlbumForm {
    pub fn validate(&self) -> Result<NewAlbum> {
        let (Some(title), Some(artist_id)) = (
            input::text(&self.title),
            input::identity("artist_id", &self.artist_id)?,
        ) else {
            return Err(Error::Validation(
                "Album title and artist_id are required".to_string(),
            ));
        };

        let total_tracks = input::integer("total_tracks", &self.total_tracks)?;
        if matches!(total_tracks, Some(n) if n <= 0) {
            return Err(Error::Validation(
                "total_tracks must be a positive integer".to_string(),
            ));
        }

        Ok(NewAlbum {
            title,
            release_date: input::date("release_date", &self.release_date)?,
            total_tracks,
            artist_id,
        })
    }
}

const SELECT_ALBUMS: &str = r#"
    SELECT
        a.album_id,
        a.title,
        a.release_date,
        a.total_tracks,
        ar.stage_name AS artist_name,
        ar.artist_id
    FROM albums a
    LEFT JOIN artists ar ON a.artist_id = ar.artist_id
"#;

/// List all albums with artist names, newest first
pub async fn list_albums(pool: &SqlitePool) -> Result<Vec<Album>> {
    let sql = format!("{} ORDER BY a.album_id DESC", SELECT_ALBUMS);
    let albums = sqlx::query_as::<_, Album>(&sql).fetch_all(pool).await?;
    Ok(albums)
}

pub async fn get_album(pool: &SqlitePool, album_id: i64) -> Result<Option<Album>> {
    let sql = format!("{} WHERE a.album_id = ?", SELECT_ALBUMS);
    let album = sqlx::query_as::<_, Album>(&sql)
        .bind(album_id)
        .fetch_optional(pool)
        .await?;
    Ok(album)
}

/// Insert a new album; `artist_id` must reference an existing artist
pub async fn create_album(pool: &SqlitePool, form: &AlbumForm) -> Result<(i64, NewAlbum)> {
    let album = form.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO albums (title, release_date, total_tracks, artist_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&album.title)
    .bind(album.release_date)
    .bind(album.total_tracks)
    .bind(album.artist_id)
    .execute(pool)
    .await?;

    Ok((result.last_insert_rowid(), album))
}

/// Overwrite every field of an existing album
pub async fn update_album(pool: &SqlitePool, album_id: i64, form: &AlbumForm) -> Result<NewAlbum> {
    let album = form.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE albums
        SET title = ?, release_date = ?, total_tracks = ?, artist_id = ?
        WHERE album_id = ?
        "#,
    )
    .bind(&album.title)
    .bind(album.release_date)
    .bind(album.total_tracks)
    .bind(album.artist_id)
    .bind(album_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Album not found".to_string()));
    }

    Ok(album)
}

pub async fn delete_album(pool: &SqlitePool, album_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE album_id = ?")
        .bind(album_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Album not found".to_string()));
    }

    Ok(())
}
