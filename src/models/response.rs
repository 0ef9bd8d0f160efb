// JSON response envelopes (paths and shapes are the compatibility contract)

use serde::Serialize;

use super::{Bay, GlobalStats, LevelStats, LowBatteryBay, StaleBay};

/// GET /api/health. Always served with 200; `database` flips to
/// "disconnected" and counts drop to 0 when the store is unreachable.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub total_bays: u64,
    pub total_events: u64,
}

/// GET /api/bays.
#[derive(Debug, Serialize)]
pub struct BaysResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Bay>,
}

/// GET /api/bays/level/{level}; echoes the normalized level back.
#[derive(Debug, Serialize)]
pub struct LevelBaysResponse {
    pub success: bool,
    pub level: String,
    pub count: usize,
    pub data: Vec<Bay>,
}

/// GET /api/stats. Global figures inline, per-level breakdown in `levels`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub global: GlobalStats,
    pub levels: Vec<LevelStats>,
}

/// GET /api/maintenance/low-battery.
#[derive(Debug, Serialize)]
pub struct LowBatteryResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<LowBatteryBay>,
}

/// GET /api/maintenance/stale.
#[derive(Debug, Serialize)]
pub struct StaleResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<StaleBay>,
}

/// Failure envelope; `error` carries a stable message, never internal detail.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
}
