// Domain models and wire shapes

mod bay;
mod response;
mod stats;

pub use bay::{Bay, BayMetrics};
pub use response::{
    BaysResponse, ErrorBody, HealthResponse, LevelBaysResponse, LowBatteryResponse, StaleResponse,
    StatsResponse,
};
pub use stats::{GlobalStats, LevelStats, LowBatteryBay, StaleBay};
