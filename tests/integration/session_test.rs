use charge::core::reading::{Reading, ReadingSource};
use charge::core::sample_store::{JsonFileStore, MemoryStore, PersistedSample, SampleStore};
use charge::core::session;
use charge::error::{ChargeError, Result};
use charge::ui::format_report;
use chrono::{DateTime, Duration, Local, TimeZone};
use std::fs;
use tempfile::TempDir;

struct FixedSource(Reading);

impl ReadingSource for FixedSource {
    fn read(&self) -> Result<Reading> {
        Ok(self.0.clone())
    }
}

struct BrokenSource;

impl ReadingSource for BrokenSource {
    fn read(&self) -> Result<Reading> {
        Err(ChargeError::reading_source("registry unavailable"))
    }
}

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 11, 2, 8, 45, 0).unwrap()
}

fn charging_reading() -> Reading {
    Reading {
        raw_current: Some(3000),
        raw_max: Some(4000),
        voltage: Some(12_480),
        design_capacity: Some(5000),
        cell_voltages: vec![4160, 4160, 4160],
        is_charging: true,
        external_connected: true,
        instant_amperage: Some(1850),
    }
}

fn previous_sample() -> PersistedSample {
    PersistedSample {
        timestamp: now() - Duration::minutes(30),
        capacity: 2800,
        voltage: 12_300,
        external_connected: true,
    }
}

#[test]
fn test_incomplete_readings_leave_store_untouched() {
    let incomplete = [
        Reading {
            raw_current: None,
            ..charging_reading()
        },
        Reading {
            raw_max: None,
            ..charging_reading()
        },
        Reading {
            voltage: None,
            ..charging_reading()
        },
        Reading::default(),
    ];

    for reading in incomplete {
        let mut store = MemoryStore::with_sample(previous_sample());
        let err = session::run(&FixedSource(reading.clone()), &mut store, now()).unwrap_err();

        assert!(err.is_incomplete_reading(), "Unexpected error for {:?}: {}", reading, err);
        assert_eq!(store.load(), Some(previous_sample()));
        assert_eq!(store.writes(), 0);
    }
}

#[test]
fn test_source_failure_leaves_store_untouched() {
    let mut store = MemoryStore::new();
    let err = session::run(&BrokenSource, &mut store, now()).unwrap_err();

    assert!(!err.is_incomplete_reading());
    assert!(store.load().is_none());
}

#[test]
fn test_first_run_reports_without_rate_and_saves() {
    let mut store = MemoryStore::new();
    let report = session::run(&FixedSource(charging_reading()), &mut store, now()).unwrap();

    assert!(report.previous.is_none());
    assert!(report.metrics.rate.is_none());
    assert!(report.metrics.time_remaining.is_none());
    assert_eq!(report.metrics.precise_percentage, 75.0);
    assert!(report.persisted);

    let saved = store.sample().unwrap();
    assert_eq!(saved.timestamp, now());
    assert_eq!(saved.capacity, 3000);
    assert_eq!(saved.voltage, 12_480);
    assert!(saved.external_connected);

    let text = format_report(&report);
    assert!(text.contains("Precise Charge Level: 75.0000%"));
    assert!(text.contains("Battery Voltage: 12.480V"));
    assert!(text.contains("Battery Health: 80.00%"));
    assert!(!text.contains("Estimated Time"));
}

#[test]
fn test_second_run_reports_rate_and_time_to_full() {
    let mut store = MemoryStore::with_sample(previous_sample());
    let report = session::run(&FixedSource(charging_reading()), &mut store, now()).unwrap();

    assert_eq!(report.previous, Some(previous_sample()));
    assert_eq!(report.metrics.time_remaining.map(|t| t.to_string()), Some("2h30m".to_string()));

    let text = format_report(&report);
    assert!(text.contains("Charging Rate: 400.0 mAh/hour"));
    assert!(text.contains("Estimated Time to Full: 2h30m"));
    assert!(text.contains("Cell 3: 4.160V"));

    // The new sample replaces the old one
    assert_eq!(store.sample().unwrap().capacity, 3000);
}

#[test]
fn test_discharging_report_labels() {
    let reading = Reading {
        raw_current: Some(2600),
        is_charging: false,
        external_connected: false,
        instant_amperage: Some(-1200),
        ..charging_reading()
    };
    let mut store = MemoryStore::with_sample(previous_sample());
    let report = session::run(&FixedSource(reading), &mut store, now()).unwrap();

    let text = format_report(&report);
    assert!(text.contains("Discharge Rate: 400.0 mAh/hour"));
    assert!(text.contains("Estimated Time to Empty: 6h30m"));
    assert!(text.contains("Instant Amperage: -1200 mA"));
}

#[test]
fn test_failed_save_does_not_fail_run() {
    let mut store = MemoryStore::with_sample(previous_sample()).failing_writes();
    let report = session::run(&FixedSource(charging_reading()), &mut store, now()).unwrap();

    assert!(!report.persisted);
    assert!(report.metrics.rate.is_some());
    assert_eq!(store.load(), Some(previous_sample()));
}

#[test]
fn test_corrupt_state_file_treated_as_first_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    fs::write(&path, "{ truncated").unwrap();

    let mut store = JsonFileStore::new(&path);
    let report = session::run(&FixedSource(charging_reading()), &mut store, now()).unwrap();

    assert!(report.previous.is_none());
    assert!(report.metrics.rate.is_none());
    assert!(report.persisted);
    assert_eq!(store.load().unwrap().capacity, 3000);
}

#[test]
fn test_consecutive_runs_through_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(temp_dir.path().join("state.json"));

    let first = Reading {
        raw_current: Some(2800),
        ..charging_reading()
    };
    session::run(&FixedSource(first), &mut store, now() - Duration::minutes(30)).unwrap();

    let report = session::run(&FixedSource(charging_reading()), &mut store, now()).unwrap();
    assert_eq!(report.metrics.time_remaining.map(|t| t.to_string()), Some("2h30m".to_string()));
}
