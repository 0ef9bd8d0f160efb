// Bay: one physical parking space and its last persisted sensor state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current state of one parking bay as written by the ingestion pipeline.
/// Field names are the wire contract; `updated_at` serializes as RFC3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bay {
    /// Stable unique id, `<level>-<section>-<seq>` (e.g. "L1-A-03").
    pub bay_id: String,
    pub parking_id: String,
    pub level: String,
    pub occupied: bool,
    pub metrics: BayMetrics,
    pub updated_at: DateTime<Utc>,
}

/// Sensor metrics attached to a bay. Either value may be missing; a missing
/// metric is `None` on the wire (`null`), never a sentinel number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BayMetrics {
    pub temperature_c: Option<f64>,
    pub battery_pct: Option<u8>,
}
