//! Artist repository operations
//!
//! Artists are the root entity: albums, concerts and contracts all reference
//! an artist by `artist_id`.

use crate::input::{self, FormValue};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Artist record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub artist_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Display name used everywhere an artist is referenced
    pub stage_name: String,
    pub genre: Option<String>,
    pub debut_year: Option<i64>,
}

/// Artist fields as submitted by a client (create and full-replace update)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub first_name: Option<FormValue>,
    pub last_name: Option<FormValue>,
    pub stage_name: Option<FormValue>,
    pub genre: Option<FormValue>,
    pub debut_year: Option<FormValue>,
}

/// Validated artist fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub first_name: String,
    pub last_name: Option<String>,
    pub stage_name: String,
    pub genre: Option<String>,
    pub debut_year: Option<i64>,
}

impl ArtistForm {
    /// Check required fields and convert optional ones
    pub fn validate(&self) -> Result<NewArtist> {
        let (Some(first_name), Some(stage_name)) =
            (input::text(&self.first_name), input::text(&self.stage_name))
        else {
            return Err(Error::Validation(
                "First name and stage name are required".to_string(),
            ));
        };

        Ok(NewArtist {
            first_name,
            last_name: input::text(&self.last_name),
            stage_name,
            genre: input::text(&self.genre),
            debut_year: input::integer("debut_year", &self.debut_year)?,
        })
    }
}

/// List all artists, most recently created first
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(
        r#"
        SELECT artist_id, first_name, last_name, stage_name, genre, debut_year
        FROM artists
        ORDER BY artist_id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// Load a single artist
pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(
        r#"
        SELECT artist_id, first_name, last_name, stage_name, genre, debut_year
        FROM artists
        WHERE artist_id = ?
        "#,
    )
    .bind(artist_id)
    .fetch_optional(pool)
    .await?;

    Ok(artist)
}

/// Insert a new artist and return its identity
pub async fn create_artist(pool: &SqlitePool, form: &ArtistForm) -> Result<(i64, NewArtist)> {
    let artist = form.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (first_name, last_name, stage_name, genre, debut_year)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.first_name)
    .bind(&artist.last_name)
    .bind(&artist.stage_name)
    .bind(&artist.genre)
    .bind(artist.debut_year)
    .execute(pool)
    .await?;

    Ok((result.last_insert_rowid(), artist))
}

/// Overwrite every field of an existing artist
pub async fn update_artist(
    pool: &SqlitePool,
    artist_id: i64,
    form: &ArtistForm,
) -> Result<NewArtist> {
    let artist = form.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE artists
        SET first_name = ?, last_name = ?, stage_name = ?, genre = ?, debut_year = ?
        WHERE artist_id = ?
        "#,
    )
    .bind(&artist.first_name)
    .bind(&artist.last_name)
    .bind(&artist.stage_name)
    .bind(&artist.genre)
    .bind(artist.debut_year)
    .bind(artist_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Artist not found".to_string()));
    }

    Ok(artist)
}

/// Delete an artist
///
/// Artists still referenced by albums, concerts or contracts are protected by
/// the store's `ON DELETE RESTRICT` constraint; that failure surfaces as
/// [`Error::Database`].
pub async fn delete_artist(pool: &SqlitePool, artist_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE artist_id = ?")
        .bind(artist_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Artist not found".to_string()));
    }

    Ok(())
}
