//! Dashboard aggregation
//!
//! Statistics are recomputed from current store contents on every call.
//! Each aggregate is an independent query over a connection; [`dashboard_stats`]
//! runs them all inside one read transaction so the combined result reflects a
//! single snapshot of the store. Any failing query aborts the whole call.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

/// Assumed attendance per concert used for revenue estimates
pub const ESTIMATED_ATTENDANCE: f64 = 50_000.0;

/// Number of artists reported in the revenue ranking
pub const TOP_ARTISTS_LIMIT: i64 = 5;

/// Number of entries in the activity feed
pub const ACTIVITY_FEED_LIMIT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub artists: i64,
    pub albums: i64,
    pub concerts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopArtist {
    pub stage_name: String,
    pub concert_count: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLogEntry {
    #[serde(skip_serializing, default)]
    pub log_id: i64,
    pub log_message: String,
    /// Stored by the trigger as UTC `CURRENT_TIMESTAMP`
    pub log_time: DateTime<Utc>,
}

/// Body of `GET /api/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_artists: i64,
    pub total_albums: i64,
    pub total_concerts: i64,
    pub estimated_revenue: f64,
    pub genres: Vec<GenreCount>,
    pub top_artists: Vec<TopArtist>,
    pub activity_feed: Vec<ActivityLogEntry>,
}

/// Compute every dashboard statistic from one consistent snapshot
pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats> {
    let mut tx = pool.begin().await?;

    let counts = entity_counts(&mut tx).await?;
    let estimated_revenue = estimated_revenue(&mut tx).await?;
    let genres = genre_distribution(&mut tx).await?;
    let top_artists = top_artists_by_revenue(&mut tx).await?;
    let activity_feed = recent_activity(&mut tx).await?;

    tx.commit().await?;

    Ok(DashboardStats {
        total_artists: counts.artists,
        total_albums: counts.albums,
        total_concerts: counts.concerts,
        estimated_revenue,
        genres,
        top_artists,
        activity_feed,
    })
}

/// Row counts of the artist, album and concert tables
pub async fn entity_counts(conn: &mut SqliteConnection) -> Result<EntityCounts> {
    let (artists, albums, concerts): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM artists),
            (SELECT COUNT(*) FROM albums),
            (SELECT COUNT(*) FROM concerts)
        "#,
    )
    .fetch_one(conn)
    .await?;

    Ok(EntityCounts {
        artists,
        albums,
        concerts,
    })
}

/// Sum of `ticket_price × attendance` over all concerts, rounded to cents
///
/// Unpriced concerts contribute nothing; an empty table yields zero.
pub async fn estimated_revenue(conn: &mut SqliteConnection) -> Result<f64> {
    let revenue: f64 = sqlx::query_scalar(
        "SELECT ROUND(COALESCE(SUM(ticket_price * ?), 0), 2) FROM concerts",
    )
    .bind(ESTIMATED_ATTENDANCE)
    .fetch_one(conn)
    .await?;

    Ok(revenue)
}

/// Artist count per genre in alphabetical order; artists without a genre are left out
pub async fn genre_distribution(conn: &mut SqliteConnection) -> Result<Vec<GenreCount>> {
    let genres = sqlx::query_as::<_, GenreCount>(
        r#"
        SELECT genre, COUNT(*) AS count
        FROM artists
        WHERE genre IS NOT NULL
        GROUP BY genre
        ORDER BY genre
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(genres)
}

/// Artists ranked by estimated concert revenue
///
/// Outer join, so artists without concerts still rank (revenue 0, count 0).
pub async fn top_artists_by_revenue(conn: &mut SqliteConnection) -> Result<Vec<TopArtist>> {
    let artists = sqlx::query_as::<_, TopArtist>(
        r#"
        SELECT
            ar.stage_name,
            COUNT(c.concert_id) AS concert_count,
            ROUND(COALESCE(SUM(c.ticket_price * ?), 0), 2) AS revenue
        FROM artists ar
        LEFT JOIN concerts c ON ar.artist_id = c.artist_id
        GROUP BY ar.artist_id, ar.stage_name
        ORDER BY revenue DESC, ar.artist_id ASC
        LIMIT ?
        "#,
    )
    .bind(ESTIMATED_ATTENDANCE)
    .bind(TOP_ARTISTS_LIMIT)
    .fetch_all(conn)
    .await?;

    Ok(artists)
}

/// Most recent activity log entries, newest first
pub async fn recent_activity(conn: &mut SqliteConnection) -> Result<Vec<ActivityLogEntry>> {
    let entries = sqlx::query_as::<_, ActivityLogEntry>(
        r#"
        SELECT log_id, log_message, log_time
        FROM concert_log
        ORDER BY log_time DESC, log_id DESC
        LIMIT ?
        "#,
    )
    .bind(ACTIVITY_FEED_LIMIT)
    .fetch_all(conn)
    .await?;

    Ok(entries)
}
