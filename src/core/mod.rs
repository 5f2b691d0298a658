// Core business logic module

pub mod config;
pub mod estimator;
pub mod metrics;
pub mod reading;
pub mod sample_store;
pub mod session;

// Re-export commonly used items
pub use config::Settings;
pub use estimator::{estimate_rate, estimate_remaining, ChargeRate, TimeRemaining};
pub use metrics::DerivedMetrics;
pub use reading::{decode_amperage, CompleteReading, Reading, ReadingSource};
pub use sample_store::{JsonFileStore, MemoryStore, PersistedSample, SampleStore};
pub use session::Report;
