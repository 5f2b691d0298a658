use crate::core::reading::CompleteReading;
use crate::error::{ChargeError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The last successful reading, kept between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSample {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Local>,
    /// Capacity in mAh at capture time
    pub capacity: u32,
    /// Pack voltage in mV at capture time
    pub voltage: u32,
    #[serde(default)]
    pub external_connected: bool,
}

impl PersistedSample {
    pub fn capture(reading: &CompleteReading, now: DateTime<Local>) -> Self {
        Self {
            timestamp: now,
            capacity: reading.raw_current,
            voltage: reading.voltage,
            external_connected: reading.external_connected,
        }
    }
}

/// Durable home for the single most recent sample.
///
/// `load` never fails: a missing, unreadable or malformed record is the same
/// as having no history. `save` reports failures so the caller can decide to
/// ignore them.
pub trait SampleStore {
    fn load(&self) -> Option<PersistedSample>;
    fn save(&mut self, sample: &PersistedSample) -> Result<()>;
}

/// Stores the sample as a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleStore for JsonFileStore {
    fn load(&self) -> Option<PersistedSample> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("No previous sample at {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str::<PersistedSample>(&data) {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::debug!("Ignoring unreadable sample at {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&mut self, sample: &PersistedSample) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string(sample)?;
        fs::write(&self.path, data)?;

        log::debug!("Saved sample to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the sample in memory. Writes can be made to fail on purpose.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sample: Option<PersistedSample>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample(sample: PersistedSample) -> Self {
        Self {
            sample: Some(sample),
            ..Self::default()
        }
    }

    /// Every subsequent `save` returns an error and leaves the sample alone
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn sample(&self) -> Option<&PersistedSample> {
        self.sample.as_ref()
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SampleStore for MemoryStore {
    fn load(&self) -> Option<PersistedSample> {
        self.sample.clone()
    }

    fn save(&mut self, sample: &PersistedSample) -> Result<()> {
        if self.fail_writes {
            return Err(ChargeError::other("memory store is read-only"));
        }
        self.sample = Some(sample.clone());
        self.writes += 1;
        Ok(())
    }
}

/// Timestamps are written as RFC 3339. Naive ISO-8601 values without an
/// offset are read back as local time.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Local>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local));
        }

        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local.from_local_datetime(&naive).earliest()
    }
}
