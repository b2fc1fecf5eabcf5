//! Concert repository operations
//!
//! Every inserted concert also produces an activity log entry through the
//! store's `concert_log_after_insert` trigger.

use crate::input::{self, FormValue};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Concert with the performing artist's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Concert {
    pub concert_id: i64,
    pub concert_name: String,
    pub location: Option<String>,
    pub concert_date: Option<NaiveDate>,
    pub ticket_price: Option<f64>,
    pub artist_name: Option<String>,
    pub artist_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcertForm {
    pub concert_name: Option<FormValue>,
    pub location: Option<FormValue>,
    pub concert_date: Option<FormValue>,
    pub ticket_price: Option<FormValue>,
    pub artist_id: Option<FormValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewConcert {
    pub concert_name: String,
    pub location: Option<String>,
    pub concert_date: Option<NaiveDate>,
    pub ticket_price: Option<f64>,
    pub artist_id: i64,
}

impl ConcertForm {
    pub fn validate(&self) -> Result<NewConcert> {
        let (Some(concert_name), Some(artist_id)) = (
            input::text(&self.concert_name),
            input::identity("artist_id", &self.artist_id)?,
        ) else {
            return Err(Error::Validation(
                "Concert name and artist_id are required".to_string(),
            ));
        };

        let ticket_price = input::decimal("ticket_price", &self.ticket_price)?;
        if matches!(ticket_price, Some(p) if p < 0.0) {
            return Err(Error::Validation(
                "ticket_price cannot be negative".to_string(),
            ));
        }

        Ok(NewConcert {
            concert_name,
            location: input::text(&self.location),
            concert_date: input::date("concert_date", &self.concert_date)?,
            ticket_price,
            artist_id,
        })
    }
}

const SELECT_CONCERTS: &str = r#"
    SELECT
        c.concert_id,
        c.concert_name,
        c.location,
        c.concert_date,
        c.ticket_price,
        ar.stage_name AS artist_name,
        ar.artist_id
    FROM concerts c
    LEFT JOIN artists ar ON c.artist_id = ar.artist_id
"#;

/// List all concerts, latest date first; undated concerts last
pub async fn list_concerts(pool: &SqlitePool) -> Result<Vec<Concert>> {
    let sql = format!(
        "{} ORDER BY c.concert_date DESC, c.concert_id DESC",
        SELECT_CONCERTS
    );
    let concerts = sqlx::query_as::<_, Concert>(&sql).fetch_all(pool).await?;
    Ok(concerts)
}

pub async fn get_concert(pool: &SqlitePool, concert_id: i64) -> Result<Option<Concert>> {
    let sql = format!("{} WHERE c.concert_id = ?", SELECT_CONCERTS);
    let concert = sqlx::query_as::<_, Concert>(&sql)
        .bind(concert_id)
        .fetch_optional(pool)
        .await?;
    Ok(concert)
}

pub async fn create_concert(pool: &SqlitePool, form: &ConcertForm) -> Result<(i64, NewConcert)> {
    let concert = form.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO concerts (concert_name, location, concert_date, ticket_price, artist_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&concert.concert_name)
    .bind(&concert.location)
    .bind(concert.concert_date)
    .bind(concert.ticket_price)
    .bind(concert.artist_id)
    .execute(pool)
    .await?;

    Ok((result.last_insert_rowid(), concert))
}

pub async fn update_concert(
    pool: &SqlitePool,
    concert_id: i64,
    form: &ConcertForm,
) -> Result<NewConcert> {
    let concert = form.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE concerts
        SET concert_name = ?, location = ?, concert_date = ?, ticket_price = ?, artist_id = ?
        WHERE concert_id = ?
        "#,
    )
    .bind(&concert.concert_name)
    .bind(&concert.location)
    .bind(concert.concert_date)
    .bind(concert.ticket_price)
    .bind(concert.artist_id)
    .bind(concert_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Concert not found".to_string()));
    }

    Ok(concert)
}

pub async fn delete_concert(pool: &SqlitePool, concert_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM concerts WHERE concert_id = ?")
        .bind(concert_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Concert not found".to_string()));
    }

    Ok(())
}
