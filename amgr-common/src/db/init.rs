//! Database initialization
//!
//! Opens (or creates) the SQLite entity store and makes sure every table,
//! index and trigger exists. Schema creation is idempotent, so this runs on
//! every startup.

use crate::config::PoolSettings;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// SQLite busy timeout applied to every pooled connection
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connection options shared by the pool and one-off connections
///
/// Foreign keys are a per-connection setting in SQLite, so they are enabled
/// here rather than with a single `PRAGMA` against the pool.
pub fn connect_options(db_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
}

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path, pool_settings: PoolSettings) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(pool_settings.acquire_timeout)
        .connect_with(connect_options(db_path))
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    info!(
        "Database pool ready (max {} connections, {:?} acquire timeout)",
        pool_settings.max_connections, pool_settings.acquire_timeout
    );

    Ok(pool)
}

/// Create all entity store tables, indexes and triggers
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_artists_table(pool).await?;
    create_albums_table(pool).await?;
    create_concerts_table(pool).await?;
    create_contracts_table(pool).await?;
    create_concert_log_table(pool).await?;
    Ok(())
}

pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            artist_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT,
            stage_name TEXT NOT NULL,
            genre TEXT,
            debut_year INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Albums reference their owning artist; an artist with albums cannot be deleted
pub async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            album_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            release_date DATE,
            total_tracks INTEGER CHECK (total_tracks IS NULL OR total_tracks > 0),
            artist_id INTEGER NOT NULL
                REFERENCES artists(artist_id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_concerts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS concerts (
            concert_id INTEGER PRIMARY KEY AUTOINCREMENT,
            concert_name TEXT NOT NULL,
            location TEXT,
            concert_date DATE,
            ticket_price REAL CHECK (ticket_price IS NULL OR ticket_price >= 0),
            artist_id INTEGER NOT NULL
                REFERENCES artists(artist_id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_concerts_artist ON concerts(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_contracts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contracts (
            contract_id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_type TEXT NOT NULL,
            management_fee REAL CHECK (management_fee IS NULL OR management_fee >= 0),
            start_date DATE,
            end_date DATE,
            artist_id INTEGER NOT NULL
                REFERENCES artists(artist_id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contracts_artist ON contracts(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Append-only activity log
///
/// The application only reads this table. Entries are written by the
/// `concert_log_after_insert` trigger whenever a concert is scheduled.
pub async fn create_concert_log_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS concert_log (
            log_id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_message TEXT NOT NULL,
            log_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_concert_log_time ON concert_log(log_time)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS concert_log_after_insert
        AFTER INSERT ON concerts
        BEGIN
            INSERT INTO concert_log (log_message)
            VALUES ('New concert scheduled: ' || NEW.concert_name);
        END
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
