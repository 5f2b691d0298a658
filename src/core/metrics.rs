use crate::core::estimator::{estimate_rate, estimate_remaining, ChargeRate, TimeRemaining};
use crate::core::reading::CompleteReading;
use crate::core::sample_store::PersistedSample;
use chrono::{DateTime, Local};

/// Values computed from a reading on every run. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Charge level from raw capacities; can exceed 100 on some packs
    pub precise_percentage: f64,
    /// Maximum capacity as a percentage of design capacity
    pub health: Option<f64>,
    pub rate: Option<ChargeRate>,
    pub time_remaining: Option<TimeRemaining>,
}

pub fn precise_percentage(reading: &CompleteReading) -> f64 {
    f64::from(reading.raw_current) / f64::from(reading.raw_max) * 100.0
}

pub fn health(reading: &CompleteReading) -> Option<f64> {
    reading
        .design_capacity
        .filter(|&design| design > 0)
        .map(|design| f64::from(reading.raw_max) / f64::from(design) * 100.0)
}

pub fn derive(
    reading: &CompleteReading,
    previous: Option<&PersistedSample>,
    now: DateTime<Local>,
) -> DerivedMetrics {
    let rate = estimate_rate(reading, previous, now);

    DerivedMetrics {
        precise_percentage: precise_percentage(reading),
        health: health(reading),
        rate,
        time_remaining: estimate_remaining(reading, rate),
    }
}
