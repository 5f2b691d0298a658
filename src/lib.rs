// Charge Library - Public API

// Re-export error types
pub mod error;
pub use error::{ChargeError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Settings;

// Initialize logging, quiet unless RUST_LOG asks for more
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
