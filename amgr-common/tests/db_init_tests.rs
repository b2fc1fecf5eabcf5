//! Database initialization tests
//!
//! Exercises store bootstrap against real on-disk databases: creation,
//! reopening, constraint enforcement and the activity log trigger.

use amgr_common::config::PoolSettings;
use amgr_common::db::init::init_database;
use std::time::Duration;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("amgr.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path, PoolSettings::default()).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("amgr.db");

    let pool = init_database(&db_path, PoolSettings::default()).await.unwrap();
    sqlx::query("INSERT INTO artists (first_name, stage_name) VALUES ('Jon', 'Persisted')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path, PoolSettings::default()).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_required_columns_enforced_by_store() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("amgr.db"), PoolSettings::default())
        .await
        .unwrap();

    let result = sqlx::query("INSERT INTO artists (first_name) VALUES ('No stage name')")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "NOT NULL stage_name should be enforced");
}

#[tokio::test]
async fn test_foreign_key_and_check_constraints() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("amgr.db"), PoolSettings::default())
        .await
        .unwrap();

    let orphan = sqlx::query("INSERT INTO concerts (concert_name, artist_id) VALUES ('Nobody', 12)")
        .execute(&pool)
        .await;
    assert!(orphan.is_err(), "unknown artist_id should violate the foreign key");

    let artist_id = sqlx::query("INSERT INTO artists (first_name, stage_name) VALUES ('A', 'B')")
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();

    let negative = sqlx::query(
        "INSERT INTO concerts (concert_name, ticket_price, artist_id) VALUES ('Cheap', -1, ?)",
    )
    .bind(artist_id)
    .execute(&pool)
    .await;
    assert!(negative.is_err(), "negative ticket_price should violate the CHECK");

    let empty = sqlx::query("INSERT INTO albums (title, total_tracks, artist_id) VALUES ('Blank', 0, ?)")
        .bind(artist_id)
        .execute(&pool)
        .await;
    assert!(empty.is_err(), "zero total_tracks should violate the CHECK");
}

#[tokio::test]
async fn test_concert_insert_writes_activity_log() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("amgr.db"), PoolSettings::default())
        .await
        .unwrap();

    let artist_id = sqlx::query("INSERT INTO artists (first_name, stage_name) VALUES ('A', 'B')")
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();
    sqlx::query("INSERT INTO concerts (concert_name, artist_id) VALUES ('Opening Night', ?)")
        .bind(artist_id)
        .execute(&pool)
        .await
        .unwrap();

    let (message, has_time): (String, bool) =
        sqlx::query_as("SELECT log_message, log_time IS NOT NULL FROM concert_log")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(message, "New concert scheduled: Opening Night");
    assert!(has_time);
}

#[tokio::test]
async fn test_pool_respects_configured_size() {
    let dir = tempfile::tempdir().unwrap();
    let settings = PoolSettings {
        max_connections: 2,
        acquire_timeout: Duration::from_millis(200),
    };
    let pool = init_database(&dir.path().join("amgr.db"), settings).await.unwrap();

    let _first = pool.acquire().await.unwrap();
    let _second = pool.acquire().await.unwrap();

    // Third caller queues, then gives up once the acquire timeout elapses
    let third = pool.acquire().await;
    assert!(third.is_err(), "pool should not exceed max_connections");
}
