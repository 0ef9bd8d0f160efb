// Per-bay freshness and battery-health classification. Stateless:
// every answer is a function of the bay, the config and the caller's "now".

use chrono::{DateTime, Utc};

use crate::models::Bay;

#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    /// Seconds after which an un-updated bay counts as stale.
    pub stale_after_seconds: u64,
    /// Battery percentage strictly below this flags a bay for maintenance.
    pub low_battery_threshold: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryHealth {
    Normal,
    Low,
    /// No battery reading on the bay.
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct StalenessClassifier {
    config: ClassifierConfig,
}

impl StalenessClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Stale when `now - updated_at` is strictly greater than the window.
    /// A bay updated in the future (clock skew on the ingestion side) is Fresh.
    pub fn classify_freshness(&self, bay: &Bay, now: DateTime<Utc>) -> Freshness {
        let age = now.signed_duration_since(bay.updated_at).num_seconds();
        if age > self.config.stale_after_seconds as i64 {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    pub fn classify_battery(&self, bay: &Bay) -> BatteryHealth {
        match bay.metrics.battery_pct {
            None => BatteryHealth::Unknown,
            Some(pct) if pct < self.config.low_battery_threshold => BatteryHealth::Low,
            Some(_) => BatteryHealth::Normal,
        }
    }
}
