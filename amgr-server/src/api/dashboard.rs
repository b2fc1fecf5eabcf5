//! Dashboard statistics endpoint

use amgr_common::db::{dashboard, DashboardStats};
use axum::{extract::State, routing::get, Json, Router};
use tracing::debug;

use crate::error::{ApiResult, OrFailure};
use crate::AppState;

/// GET /api/dashboard/stats
///
/// Recomputed on every request; nothing is cached.
pub async fn get_dashboard_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let stats = dashboard::dashboard_stats(&state.db)
        .await
        .or_failure("Failed to fetch dashboard statistics")?;

    debug!(
        "Dashboard stats: {} artists, {} albums, {} concerts",
        stats.total_artists, stats.total_albums, stats.total_concerts
    );
    Ok(Json(stats))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/dashboard/stats", get(get_dashboard_stats))
}
