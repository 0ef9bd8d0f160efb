// StalenessClassifier tests: freshness window boundary, battery health.

use chrono::{Duration, TimeZone, Utc};
use parkview::classifier::{BatteryHealth, ClassifierConfig, Freshness, StalenessClassifier};
use parkview::models::{Bay, BayMetrics};

fn bay_updated_at(secs_ago: i64) -> (Bay, chrono::DateTime<Utc>) {
    let now = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();
    let bay = Bay {
        bay_id: "L1-A-01".into(),
        parking_id: "P001".into(),
        level: "L1".into(),
        occupied: false,
        metrics: BayMetrics::default(),
        updated_at: now - Duration::seconds(secs_ago),
    };
    (bay, now)
}

fn bay_with_battery(battery_pct: Option<u8>) -> Bay {
    let (mut bay, _) = bay_updated_at(0);
    bay.metrics.battery_pct = battery_pct;
    bay
}

fn classifier() -> StalenessClassifier {
    StalenessClassifier::new(ClassifierConfig {
        stale_after_seconds: 120,
        low_battery_threshold: 20,
    })
}

#[test]
fn bay_inside_window_is_fresh() {
    let (bay, now) = bay_updated_at(30);
    assert_eq!(classifier().classify_freshness(&bay, now), Freshness::Fresh);
}

#[test]
fn bay_exactly_at_window_is_fresh() {
    // The window is strict: stale only when age exceeds it.
    let (bay, now) = bay_updated_at(120);
    assert_eq!(classifier().classify_freshness(&bay, now), Freshness::Fresh);
}

#[test]
fn bay_one_second_past_window_is_stale() {
    let (bay, now) = bay_updated_at(121);
    assert_eq!(classifier().classify_freshness(&bay, now), Freshness::Stale);
}

#[test]
fn bay_updated_in_the_future_is_fresh() {
    // Clock skew on the ingestion side must not flag the bay.
    let (bay, now) = bay_updated_at(-45);
    assert_eq!(classifier().classify_freshness(&bay, now), Freshness::Fresh);
}

#[test]
fn missing_battery_is_unknown_not_low() {
    assert_eq!(
        classifier().classify_battery(&bay_with_battery(None)),
        BatteryHealth::Unknown
    );
}

#[test]
fn battery_below_threshold_is_low() {
    assert_eq!(
        classifier().classify_battery(&bay_with_battery(Some(19))),
        BatteryHealth::Low
    );
    assert_eq!(
        classifier().classify_battery(&bay_with_battery(Some(0))),
        BatteryHealth::Low
    );
}

#[test]
fn battery_at_threshold_is_normal() {
    // Strictly below: 20 with threshold 20 is still Normal.
    assert_eq!(
        classifier().classify_battery(&bay_with_battery(Some(20))),
        BatteryHealth::Normal
    );
    assert_eq!(
        classifier().classify_battery(&bay_with_battery(Some(100))),
        BatteryHealth::Normal
    );
}

#[test]
fn classification_is_deterministic() {
    let (bay, now) = bay_updated_at(500);
    let c = classifier();
    assert_eq!(
        c.classify_freshness(&bay, now),
        c.classify_freshness(&bay, now)
    );
    assert_eq!(c.classify_battery(&bay), c.classify_battery(&bay));
}
