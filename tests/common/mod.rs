// Shared test helpers: bay builders and a seeded store standing in for
// the ingestion pipeline's output.

use chrono::{DateTime, TimeZone, Utc};
use parkview::models::{Bay, BayMetrics};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

pub fn fixed_ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
}

pub fn bay(bay_id: &str, level: &str, occupied: bool, battery_pct: Option<u8>) -> Bay {
    Bay {
        bay_id: bay_id.into(),
        parking_id: "P001".into(),
        level: level.into(),
        occupied,
        metrics: BayMetrics {
            temperature_c: None,
            battery_pct,
        },
        updated_at: fixed_ts(),
    }
}

/// Creates the bays/events tables in a fresh SQLite file and inserts the
/// given snapshot, the way the ingestion pipeline would have.
pub async fn seed_store(path: &Path, bays: &[Bay], event_count: u32) {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .unwrap()
        .create_if_missing(true);
    let pool: SqlitePool = SqlitePoolOptions::new().connect_with(opts).await.unwrap();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bays (
            bay_id TEXT PRIMARY KEY,
            parking_id TEXT NOT NULL,
            level TEXT NOT NULL,
            occupied INTEGER NOT NULL,
            temperature_c REAL,
            battery_pct INTEGER,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bay_id TEXT NOT NULL,
            occupied INTEGER NOT NULL,
            ts TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    for b in bays {
        sqlx::query(
            "INSERT OR REPLACE INTO bays (bay_id, parking_id, level, occupied, temperature_c, battery_pct, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&b.bay_id)
        .bind(&b.parking_id)
        .bind(&b.level)
        .bind(b.occupied)
        .bind(b.metrics.temperature_c)
        .bind(b.metrics.battery_pct.map(i64::from))
        .bind(b.updated_at.to_rfc3339())
        .execute(&pool)
        .await
        .unwrap();
    }

    for i in 0..event_count {
        sqlx::query("INSERT INTO events (bay_id, occupied, ts) VALUES ($1, $2, $3)")
            .bind(format!("L1-A-{:02}", i))
            .bind(i % 2 == 0)
            .bind(fixed_ts().to_rfc3339())
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
}
