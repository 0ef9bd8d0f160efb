// GET handlers. Each composes one store read with pure aggregation;
// nothing here keeps per-client state between polls.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use chrono::Utc;

use super::{ApiError, AppState};
use crate::aggregator;
use crate::models::{
    BaysResponse, HealthResponse, LevelBaysResponse, LowBatteryResponse, StaleResponse,
    StatsResponse,
};
use crate::store_repo::normalize_level;
use crate::version::{NAME, VERSION};

/// GET / — the polling dashboard (rendering is not part of the core).
pub(super) async fn dashboard_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/health — fails soft: always 200, with `database` and zeroed
/// counts reporting a store outage instead of an error status.
pub(super) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    if state.store.health_check().await {
        match tokio::try_join!(state.store.fetch_all_bays(), state.store.count_events()) {
            Ok((bays, total_events)) => {
                return Json(HealthResponse {
                    status: "ok",
                    database: "connected",
                    total_bays: bays.len() as u64,
                    total_events,
                });
            }
            Err(e) => tracing::warn!("health counts unavailable: {}", e),
        }
    }
    Json(HealthResponse {
        status: "degraded",
        database: "disconnected",
        total_bays: 0,
        total_events: 0,
    })
}

/// GET /api/bays — full current snapshot. Zero bays is a success, not an error.
pub(super) async fn bays_handler(
    State(state): State<AppState>,
) -> Result<Json<BaysResponse>, ApiError> {
    let bays = state.store.fetch_all_bays().await?;
    tracing::debug!(count = bays.len(), "served bay snapshot");
    Ok(Json(BaysResponse {
        success: true,
        count: bays.len(),
        data: bays,
    }))
}

/// GET /api/stats — global and per-level figures computed from ONE fetched
/// snapshot, so the two views can never disagree about the same poll.
pub(super) async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let bays = state.store.fetch_all_bays().await?;
    let global = aggregator::compute_global_stats(&bays);
    let levels = aggregator::compute_level_stats(&bays, state.level_order);
    Ok(Json(StatsResponse {
        success: true,
        global,
        levels,
    }))
}

/// GET /api/bays/level/{level} — unknown level is an empty success.
pub(super) async fn bays_by_level_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> Result<Json<LevelBaysResponse>, ApiError> {
    let level = normalize_level(&level);
    let bays = state.store.fetch_bays_by_level(&level).await?;
    Ok(Json(LevelBaysResponse {
        success: true,
        level,
        count: bays.len(),
        data: bays,
    }))
}

/// GET /api/maintenance/low-battery — triage list, most urgent first.
pub(super) async fn low_battery_handler(
    State(state): State<AppState>,
) -> Result<Json<LowBatteryResponse>, ApiError> {
    let bays = state.store.fetch_all_bays().await?;
    let data = aggregator::low_battery_bays(&bays, &state.classifier);
    if !data.is_empty() {
        tracing::warn!(count = data.len(), "bays below low-battery threshold");
    }
    Ok(Json(LowBatteryResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// GET /api/maintenance/stale — bays not updated within the freshness
/// window, oldest first.
pub(super) async fn stale_handler(
    State(state): State<AppState>,
) -> Result<Json<StaleResponse>, ApiError> {
    let bays = state.store.fetch_all_bays().await?;
    let data = aggregator::stale_bays(&bays, &state.classifier, Utc::now());
    Ok(Json(StaleResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
