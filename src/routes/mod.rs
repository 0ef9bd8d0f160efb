// HTTP routes

mod http;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::LevelOrder;
use crate::classifier::{ClassifierConfig, StalenessClassifier};
use crate::config::AppConfig;
use crate::models::ErrorBody;
use crate::store_repo::{BayStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<BayStore>,
    pub(crate) classifier: StalenessClassifier,
    pub(crate) level_order: LevelOrder,
}

pub fn app(store: Arc<BayStore>, config: &AppConfig) -> Router {
    let state = AppState {
        store,
        classifier: StalenessClassifier::new(ClassifierConfig {
            stale_after_seconds: config.thresholds.stale_after_seconds,
            low_battery_threshold: config.thresholds.low_battery_pct,
        }),
        level_order: config.aggregation.level_order,
    };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/bays", get(http::bays_handler)) // GET /api/bays
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route("/api/bays/level/{level}", get(http::bays_by_level_handler))
        .route("/api/maintenance/low-battery", get(http::low_battery_handler))
        .route("/api/maintenance/stale", get(http::stale_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Store failures become a stable 503 envelope; the detail goes to the log,
/// never to the client.
pub(crate) struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self.0);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody {
                success: false,
                error: "store unavailable",
            }),
        )
            .into_response()
    }
}
