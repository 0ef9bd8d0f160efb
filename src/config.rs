use serde::Deserialize;

use crate::aggregator::LevelOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file the ingestion pipeline writes bay/event records into.
    pub path: String,
    pub max_pool_size: u32,
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    /// Bays reporting battery strictly below this are flagged for maintenance.
    #[serde(default = "default_low_battery_pct")]
    pub low_battery_pct: u8,
    /// A bay not updated within this window is classified stale.
    #[serde(default = "default_stale_after_seconds")]
    pub stale_after_seconds: u64,
}

fn default_low_battery_pct() -> u8 {
    20
}

fn default_stale_after_seconds() -> u64 {
    120
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low_battery_pct: default_low_battery_pct(),
            stale_after_seconds: default_stale_after_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AggregationConfig {
    /// Ordering of per-level groups in /api/stats ("lexicographic" or "numeric").
    /// Lexicographic sorts "L10" before "L2"; numeric splits the trailing digits.
    #[serde(default)]
    pub level_order: LevelOrder,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.database.query_timeout_ms > 0,
            "database.query_timeout_ms must be > 0, got {}",
            self.database.query_timeout_ms
        );
        anyhow::ensure!(
            self.thresholds.low_battery_pct <= 100,
            "thresholds.low_battery_pct must be between 0 and 100, got {}",
            self.thresholds.low_battery_pct
        );
        anyhow::ensure!(
            self.thresholds.stale_after_seconds > 0,
            "thresholds.stale_after_seconds must be > 0, got {}",
            self.thresholds.stale_after_seconds
        );
        Ok(())
    }
}
