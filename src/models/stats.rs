// Aggregated occupancy and maintenance views computed from a bay snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Facility-wide occupancy figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total: u64,
    pub occupied: u64,
    pub free: u64,
    /// Percentage occupied, one decimal; 0.0 for an empty snapshot.
    pub occupancy_rate: f64,
}

/// Occupancy figures for one level group. Averages cover only bays that
/// report the metric and are absent (`null`) when no bay in the group does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelStats {
    pub level: String,
    pub total: u64,
    pub occupied: u64,
    pub free: u64,
    pub occupancy_rate: f64,
    pub avg_temperature: Option<f64>,
    pub avg_battery: Option<f64>,
}

/// Maintenance triage entry for a bay below the low-battery threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowBatteryBay {
    pub bay_id: String,
    pub level: String,
    pub battery_pct: u8,
}

/// Maintenance triage entry for a bay whose last update exceeds the freshness window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaleBay {
    pub bay_id: String,
    pub level: String,
    pub updated_at: DateTime<Utc>,
}
