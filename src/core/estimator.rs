use crate::core::reading::CompleteReading;
use crate::core::sample_store::PersistedSample;
use chrono::{DateTime, Duration, Local};
use std::fmt;

/// Readings closer together than this are too noisy to derive a rate from
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::seconds(60);

/// Rates at or above this (mAh/hour) are treated as sampling artifacts
pub const MAX_PLAUSIBLE_RATE: f64 = 10_000.0;

/// Projections longer than this many hours are suppressed
pub const MAX_PLAUSIBLE_HOURS: f64 = 24.0;

/// Magnitude of the capacity change in mAh per hour.
///
/// Always non-negative; the direction comes from `is_charging`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChargeRate(f64);

impl ChargeRate {
    pub fn mah_per_hour(self) -> f64 {
        self.0
    }
}

/// Estimated time until full (charging) or empty (discharging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub hours: u32,
    /// 0-59
    pub minutes: u32,
}

impl TimeRemaining {
    /// Both components are truncated so the estimate never overshoots.
    fn from_hours(hours: f64) -> Self {
        let whole = hours.trunc();
        let minutes = ((hours - whole) * 60.0).trunc() as u32;
        Self {
            hours: whole as u32,
            minutes: minutes.min(59),
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{:02}m", self.hours, self.minutes)
    }
}

/// Capacity change rate between the previous sample and the current reading.
pub fn estimate_rate(
    current: &CompleteReading,
    previous: Option<&PersistedSample>,
    now: DateTime<Local>,
) -> Option<ChargeRate> {
    let previous = previous?;

    // Negative when the clock moved backwards, which also fails this check
    let elapsed = now.signed_duration_since(previous.timestamp);
    if elapsed < MIN_SAMPLE_INTERVAL {
        log::debug!("Skipping rate: only {}s since last sample", elapsed.num_seconds());
        return None;
    }

    let delta = i64::from(current.raw_current) - i64::from(previous.capacity);
    if delta == 0 {
        log::debug!("Skipping rate: capacity unchanged since last sample");
        return None;
    }

    let elapsed_hours = elapsed.num_milliseconds() as f64 / 3_600_000.0;
    let rate = delta.unsigned_abs() as f64 / elapsed_hours;

    if rate >= MAX_PLAUSIBLE_RATE {
        log::debug!("Discarding implausible rate of {:.1} mAh/hour", rate);
        return None;
    }

    Some(ChargeRate(rate))
}

/// Projects time to full when charging, or to empty otherwise.
pub fn estimate_remaining(current: &CompleteReading, rate: Option<ChargeRate>) -> Option<TimeRemaining> {
    let rate = rate?;

    let remaining_capacity = if current.is_charging {
        current.raw_max.saturating_sub(current.raw_current)
    } else {
        current.raw_current
    };

    let hours = f64::from(remaining_capacity) / rate.mah_per_hour();
    if !hours.is_finite() || hours > MAX_PLAUSIBLE_HOURS {
        log::debug!("Discarding implausible projection of {:.1} hours", hours);
        return None;
    }

    Some(TimeRemaining::from_hours(hours))
}
