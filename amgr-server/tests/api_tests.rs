//! Integration tests for amgr-server API endpoints
//!
//! Each test runs the full router against a fresh on-disk SQLite store.

use amgr_common::config::PoolSettings;
use amgr_common::db::init_database;
use amgr_server::{build_router, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app over an empty store
async fn setup_app() -> (TempDir, Router) {
    let dir = TempDir::new().expect("temp dir");
    let pool = init_database(&dir.path().join("amgr.db"), PoolSettings::default())
        .await
        .expect("Should initialize database");
    (dir, build_router(AppState::new(pool)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Send request, returning status and parsed JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, body)
}

async fn add_artist(app: &Router, stage_name: &str, genre: Option<&str>) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/artists",
            json!({ "first_name": "Test", "stage_name": stage_name, "genre": genre }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["artist_id"].as_i64().expect("artist_id")
}

async fn add_concert(app: &Router, artist_id: i64, name: &str, price: Value) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/concerts",
            json!({ "concert_name": name, "ticket_price": price, "artist_id": artist_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["concert_id"].as_i64().expect("concert_id")
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "amgr-server");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artist_lifecycle() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/artists",
            json!({
                "first_name": "Abel",
                "last_name": "Tesfaye",
                "stage_name": "The Weeknd",
                "genre": "R&B",
                "debut_year": "2010"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Artist added successfully");
    let artist_id = body["artist_id"].as_i64().unwrap();

    let (status, body) = send(&app, empty_request("GET", "/api/artists")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "artist_id": artist_id,
            "first_name": "Abel",
            "last_name": "Tesfaye",
            "stage_name": "The Weeknd",
            "genre": "R&B",
            "debut_year": 2010
        }])
    );

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/artists/{}", artist_id),
            json!({ "first_name": "Abel", "stage_name": "Weeknd" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Artist updated successfully");

    let (_, body) = send(&app, empty_request("GET", "/api/artists")).await;
    assert_eq!(body[0]["stage_name"], "Weeknd");
    assert_eq!(body[0]["genre"], Value::Null);
    assert_eq!(body[0]["debut_year"], Value::Null);

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/artists/{}", artist_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Artist deleted successfully");

    let (_, body) = send(&app, empty_request("GET", "/api/artists")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_artist_missing_required_fields() {
    let (_dir, app) = setup_app().await;

    for payload in [
        json!({ "stage_name": "Solo" }),
        json!({ "first_name": "Only" }),
        json!({ "first_name": "  ", "stage_name": "Blank" }),
    ] {
        let (status, body) = send(&app, json_request("POST", "/api/artists", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "First name and stage name are required");
    }

    let (_, body) = send(&app, empty_request("GET", "/api/artists")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let (_dir, app) = setup_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/artists")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, empty_request("DELETE", "/api/artists/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_artist_returns_not_found() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/artists/999",
            json!({ "first_name": "Ghost", "stage_name": "Ghost" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artist not found");

    let (status, body) = send(&app, empty_request("DELETE", "/api/artists/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artist not found");
}

#[tokio::test]
async fn test_delete_referenced_artist_fails() {
    let (_dir, app) = setup_app().await;
    let artist_id = add_artist(&app, "Booked", None).await;
    add_concert(&app, artist_id, "Headline", json!(40)).await;

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/artists/{}", artist_id)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to delete artist");

    let (_, body) = send(&app, empty_request("GET", "/api/artists")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// =============================================================================
// Albums
// =============================================================================

#[tokio::test]
async fn test_album_lifecycle() {
    let (_dir, app) = setup_app().await;
    let artist_id = add_artist(&app, "Daft Punk", Some("Electronic")).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/albums",
            json!({
                "title": "Discovery",
                "release_date": "2001-03-12",
                "total_tracks": "14",
                "artist_id": artist_id.to_string()
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Album added successfully");
    let album_id = body["album_id"].as_i64().unwrap();

    let (status, body) = send(&app, empty_request("GET", "/api/albums")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "album_id": album_id,
            "title": "Discovery",
            "release_date": "2001-03-12",
            "total_tracks": 14,
            "artist_name": "Daft Punk",
            "artist_id": artist_id
        }])
    );

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/albums/{}", album_id),
            json!({ "title": "Discovery (Remaster)", "artist_id": artist_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Album updated successfully");

    let (_, body) = send(&app, empty_request("GET", "/api/albums")).await;
    assert_eq!(body[0]["title"], "Discovery (Remaster)");
    assert_eq!(body[0]["release_date"], Value::Null);

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/albums/{}", album_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Album deleted successfully");

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/albums/{}", album_id)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Album not found");
}

#[tokio::test]
async fn test_album_validation() {
    let (_dir, app) = setup_app().await;
    let artist_id = add_artist(&app, "Someone", None).await;

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/albums/1", json!({ "artist_id": artist_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Album title and artist_id are required");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/albums", json!({ "title": "Ghost", "artist_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to add album");
}

// =============================================================================
// Concerts
// =============================================================================

#[tokio::test]
async fn test_concert_lifecycle() {
    let (_dir, app) = setup_app().await;
    let artist_id = add_artist(&app, "Coldplay", Some("Pop")).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/concerts",
            json!({
                "concert_name": "Music of the Spheres",
                "location": "Wembley",
                "concert_date": "2022-08-15",
                "ticket_price": "95",
                "artist_id": artist_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Concert added successfully");
    let concert_id = body["concert_id"].as_i64().unwrap();

    let (_, body) = send(&app, empty_request("GET", "/api/concerts")).await;
    assert_eq!(body[0]["concert_name"], "Music of the Spheres");
    assert_eq!(body[0]["concert_date"], "2022-08-15");
    assert_eq!(body[0]["ticket_price"], 95.0);
    assert_eq!(body[0]["artist_name"], "Coldplay");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/concerts/{}", concert_id),
            json!({ "concert_name": "Rescheduled", "artist_id": artist_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Concert updated successfully");

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/concerts/{}", concert_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Concert deleted successfully");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/concerts", json!({ "location": "Nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Concert name and artist_id are required");
}

// =============================================================================
// Contracts
// =============================================================================

#[tokio::test]
async fn test_contract_lifecycle() {
    let (_dir, app) = setup_app().await;
    let artist_id = add_artist(&app, "Signed Act", None).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/contracts",
            json!({
                "contract_type": "Management",
                "management_fee": "12.5",
                "start_date": "2024-01-01",
                "end_date": "2026-12-31",
                "artist_id": artist_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Contract added successfully");
    let contract_id = body["contract_id"].as_i64().unwrap();

    let (_, body) = send(&app, empty_request("GET", "/api/contracts")).await;
    assert_eq!(
        body,
        json!([{
            "contract_id": contract_id,
            "contract_type": "Management",
            "management_fee": 12.5,
            "start_date": "2024-01-01",
            "end_date": "2026-12-31",
            "artist_name": "Signed Act",
            "artist_id": artist_id
        }])
    );

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/contracts/{}", contract_id + 1),
            json!({ "contract_type": "Recording", "artist_id": artist_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contract not found");

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/contracts/{}", contract_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contract deleted successfully");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/contracts", json!({ "contract_type": "Orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Contract type and artist_id are required");
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_empty_store() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, empty_request("GET", "/api/dashboard/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalArtists": 0,
            "totalAlbums": 0,
            "totalConcerts": 0,
            "estimatedRevenue": 0.0,
            "genres": [],
            "topArtists": [],
            "activityFeed": []
        })
    );
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    let (_dir, app) = setup_app().await;
    let a = add_artist(&app, "A", Some("Rock")).await;
    let b = add_artist(&app, "B", Some("Rock")).await;
    add_artist(&app, "C", None).await;
    add_concert(&app, a, "First", json!(10)).await;
    add_concert(&app, a, "Second", json!(20)).await;
    add_concert(&app, b, "Third", json!(5)).await;
    add_concert(&app, b, "Fourth", json!("")).await;

    let (status, body) = send(&app, empty_request("GET", "/api/dashboard/stats")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["totalArtists"], 3);
    assert_eq!(body["totalAlbums"], 0);
    assert_eq!(body["totalConcerts"], 4);
    assert_eq!(body["estimatedRevenue"], 1_750_000.0);
    assert_eq!(body["genres"], json!([{ "genre": "Rock", "count": 2 }]));
    assert_eq!(
        body["topArtists"],
        json!([
            { "stage_name": "A", "concert_count": 2, "revenue": 1_500_000.0 },
            { "stage_name": "B", "concert_count": 2, "revenue": 250_000.0 },
            { "stage_name": "C", "concert_count": 0, "revenue": 0.0 }
        ])
    );

    let feed = body["activityFeed"].as_array().unwrap();
    assert_eq!(feed.len(), 4);
    assert_eq!(feed[0]["log_message"], "New concert scheduled: Fourth");
    assert!(feed[0]["log_time"].as_str().unwrap().ends_with('Z'));
}
