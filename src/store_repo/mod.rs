// Read-only gateway to the bay/event store. The ingestion pipeline owns
// the SQLite file and its schema; this process never writes to it.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{instrument, warn};

use crate::models::{Bay, BayMetrics};

/// Store access failure. Both variants mean the same thing to callers:
/// the store is unavailable right now; report it, do not crash.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    #[error("store read timed out after {0} ms")]
    Timeout(u64),
}

pub struct BayStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl BayStore {
    /// Opens the store lazily: no connection is made here, so the process
    /// boots even when the store file is not there yet. Each read acquires
    /// a pooled read-only connection and fails with `StoreError` if it can't.
    pub fn connect(path: &str, max_pool_size: u32, query_timeout_ms: u64) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_lazy_with(opts);
        Ok(Self {
            pool,
            query_timeout: Duration::from_millis(query_timeout_ms),
        })
    }

    /// Fresh snapshot of every bay, ordered by bay_id.
    #[instrument(skip(self), fields(repo = "store", operation = "fetch_all_bays"))]
    pub async fn fetch_all_bays(&self) -> Result<Vec<Bay>, StoreError> {
        let rows = self
            .bounded(
                sqlx::query(
                    "SELECT bay_id, parking_id, level, occupied, temperature_c, battery_pct, updated_at \
                     FROM bays ORDER BY bay_id",
                )
                .fetch_all(&self.pool),
            )
            .await?;
        rows.iter().map(bay_from_row).collect::<Result<_, _>>().map_err(StoreError::from)
    }

    /// Bays on one level; the level is normalized (trim + uppercase) before
    /// the query, and an unknown level is an empty result, not an error.
    #[instrument(skip(self), fields(repo = "store", operation = "fetch_bays_by_level"))]
    pub async fn fetch_bays_by_level(&self, level: &str) -> Result<Vec<Bay>, StoreError> {
        let level = normalize_level(level);
        let rows = self
            .bounded(
                sqlx::query(
                    "SELECT bay_id, parking_id, level, occupied, temperature_c, battery_pct, updated_at \
                     FROM bays WHERE level = $1 ORDER BY bay_id",
                )
                .bind(&level)
                .fetch_all(&self.pool),
            )
            .await?;
        rows.iter().map(bay_from_row).collect::<Result<_, _>>().map_err(StoreError::from)
    }

    /// Number of historical occupancy events. Surfaced for health reporting
    /// only; event contents are never read back.
    #[instrument(skip(self), fields(repo = "store", operation = "count_events"))]
    pub async fn count_events(&self) -> Result<u64, StoreError> {
        let row = self
            .bounded(sqlx::query("SELECT COUNT(*) FROM events").fetch_one(&self.pool))
            .await?;
        let count: i64 = row.try_get(0)?;
        Ok(count as u64)
    }

    /// True when a round-trip to the store succeeds within the timeout.
    #[instrument(skip(self), fields(repo = "store", operation = "health_check"))]
    pub async fn health_check(&self) -> bool {
        match self.bounded(sqlx::query("SELECT 1").fetch_one(&self.pool)).await {
            Ok(_) => true,
            Err(e) => {
                warn!("store health check failed: {}", e);
                false
            }
        }
    }

    /// Tears down the pool at shutdown. Reads issued afterwards fail with
    /// `StoreError::Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Runs one store read under the request-level timeout so a hung store
    /// cannot hang the handler.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(StoreError::Unavailable(e)),
            Err(_) => Err(StoreError::Timeout(self.query_timeout.as_millis() as u64)),
        }
    }
}

/// Level filters arrive from URLs in whatever case the client used;
/// the store keys levels uppercase ("L1").
pub fn normalize_level(level: &str) -> String {
    level.trim().to_uppercase()
}

fn bay_from_row(row: &SqliteRow) -> Result<Bay, sqlx::Error> {
    let updated_at_raw: String = row.try_get("updated_at")?;
    let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&updated_at_raw)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "updated_at".into(),
            source: Box::new(e),
        })?
        .with_timezone(&Utc);

    // Out-of-range battery readings count as missing, not clamped.
    let battery_pct = row
        .try_get::<Option<i64>, _>("battery_pct")?
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= 100);

    Ok(Bay {
        bay_id: row.try_get("bay_id")?,
        parking_id: row.try_get("parking_id")?,
        level: row.try_get("level")?,
        occupied: row.try_get("occupied")?,
        metrics: BayMetrics {
            temperature_c: row.try_get("temperature_c")?,
            battery_pct,
        },
        updated_at,
    })
}
