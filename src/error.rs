use std::io;
use thiserror::Error;

/// Custom error type for the charge tool
#[derive(Error, Debug)]
pub enum ChargeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not get complete battery information (missing: {})", .missing.join(", "))]
    IncompleteReading { missing: Vec<&'static str> },

    #[error("Reading source error: {0}")]
    ReadingSource(String),

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the charge tool
pub type Result<T> = std::result::Result<T, ChargeError>;

impl ChargeError {
    /// Create an incomplete reading error listing the absent fields
    pub fn incomplete(missing: Vec<&'static str>) -> Self {
        ChargeError::IncompleteReading { missing }
    }

    /// Create a reading source error
    pub fn reading_source<S: Into<String>>(msg: S) -> Self {
        ChargeError::ReadingSource(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        ChargeError::Unsupported(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ChargeError::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ChargeError::Other(msg.into())
    }

    pub fn is_incomplete_reading(&self) -> bool {
        matches!(self, ChargeError::IncompleteReading { .. })
    }
}
