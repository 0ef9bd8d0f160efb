// Pure aggregation over one bay snapshot. No I/O, no clock, no hidden
// state: the same snapshot always yields the same output.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::classifier::{BatteryHealth, Freshness, StalenessClassifier};
use crate::models::{Bay, GlobalStats, LevelStats, LowBatteryBay, StaleBay};

/// Ordering of per-level groups in stats output.
///
/// `Lexicographic` sorts on the raw level string, so "L10" < "L2".
/// `Numeric` splits a trailing digit run and compares it as a number,
/// so "L2" < "L10". The default matches the upstream store's string sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelOrder {
    #[default]
    Lexicographic,
    Numeric,
}

impl LevelOrder {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            LevelOrder::Lexicographic => a.cmp(b),
            LevelOrder::Numeric => match (split_numeric_suffix(a), split_numeric_suffix(b)) {
                (Some((pa, na)), Some((pb, nb))) => pa.cmp(pb).then(na.cmp(&nb)),
                _ => a.cmp(b),
            },
        }
    }
}

/// "L10" -> ("L", 10). None when there is no trailing digit run or it
/// does not fit in u64.
fn split_numeric_suffix(s: &str) -> Option<(&str, u64)> {
    let digits = s.len() - s.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits == s.len() {
        return None;
    }
    let n: u64 = s[digits..].parse().ok()?;
    Some((&s[..digits], n))
}

/// Facility-wide counts and occupancy rate. Duplicate bay_ids (first
/// occurrence wins) are counted once.
pub fn compute_global_stats(bays: &[Bay]) -> GlobalStats {
    let bays = dedup_by_id(bays);
    let total = bays.len() as u64;
    let occupied = bays.iter().filter(|b| b.occupied).count() as u64;
    GlobalStats {
        total,
        occupied,
        free: total - occupied,
        occupancy_rate: rate(occupied, total),
    }
}

/// Per-level breakdown, one entry per level present in the snapshot
/// (levels with no bays are simply absent), ordered per `order`.
pub fn compute_level_stats(bays: &[Bay], order: LevelOrder) -> Vec<LevelStats> {
    let bays = dedup_by_id(bays);
    let mut levels: Vec<&str> = Vec::new();
    for bay in &bays {
        if !levels.contains(&bay.level.as_str()) {
            levels.push(&bay.level);
        }
    }
    levels.sort_by(|a, b| order.compare(a, b));

    levels
        .into_iter()
        .map(|level| {
            let group: Vec<&Bay> = bays.iter().copied().filter(|b| b.level == level).collect();
            let total = group.len() as u64;
            let occupied = group.iter().filter(|b| b.occupied).count() as u64;
            LevelStats {
                level: level.to_string(),
                total,
                occupied,
                free: total - occupied,
                occupancy_rate: rate(occupied, total),
                avg_temperature: mean_present(group.iter().map(|b| b.metrics.temperature_c)),
                avg_battery: mean_present(
                    group.iter().map(|b| b.metrics.battery_pct.map(f64::from)),
                ),
            }
        })
        .collect()
}

/// Bays below the low-battery threshold, most urgent first (ascending
/// battery, bay_id as tiebreak). Bays without a battery reading are excluded.
pub fn low_battery_bays(bays: &[Bay], classifier: &StalenessClassifier) -> Vec<LowBatteryBay> {
    let mut out: Vec<LowBatteryBay> = dedup_by_id(bays)
        .into_iter()
        .filter(|b| classifier.classify_battery(b) == BatteryHealth::Low)
        .map(|b| LowBatteryBay {
            bay_id: b.bay_id.clone(),
            level: b.level.clone(),
            // classify_battery == Low implies the reading is present
            battery_pct: b.metrics.battery_pct.unwrap_or_default(),
        })
        .collect();
    out.sort_by(|a, b| a.battery_pct.cmp(&b.battery_pct).then(a.bay_id.cmp(&b.bay_id)));
    out
}

/// Bays whose last update exceeds the freshness window, oldest first.
pub fn stale_bays(
    bays: &[Bay],
    classifier: &StalenessClassifier,
    now: DateTime<Utc>,
) -> Vec<StaleBay> {
    let mut out: Vec<StaleBay> = dedup_by_id(bays)
        .into_iter()
        .filter(|b| classifier.classify_freshness(b, now) == Freshness::Stale)
        .map(|b| StaleBay {
            bay_id: b.bay_id.clone(),
            level: b.level.clone(),
            updated_at: b.updated_at,
        })
        .collect();
    out.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.bay_id.cmp(&b.bay_id)));
    out
}

/// First occurrence of each bay_id wins; later duplicates are dropped so
/// nothing is double-counted.
fn dedup_by_id(bays: &[Bay]) -> Vec<&Bay> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(bays.len());
    bays.iter().filter(|b| seen.insert(b.bay_id.as_str())).collect()
}

fn rate(occupied: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(occupied as f64 / total as f64 * 100.0)
}

/// Mean over the present values, one decimal; None when every value is absent.
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        return None;
    }
    Some(round1(present.iter().sum::<f64>() / present.len() as f64))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
