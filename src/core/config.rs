use crate::error::{ChargeError, Result};
use std::path::PathBuf;

/// Environment variable that overrides the state file location
pub const STATE_FILE_ENV: &str = "CHARGE_STATE_FILE";

const APP_DIR: &str = "charge";
const STATE_FILE_NAME: &str = "last_sample.json";
const FALLBACK_STATE_FILE: &str = "charge_state.json";

/// Runtime settings resolved from the command line, environment and platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_file: PathBuf,
    /// Parse this captured `ioreg` dump instead of querying the hardware
    pub dump_file: Option<PathBuf>,
}

impl Settings {
    /// `state_file` is the explicit override (flag or environment), if any.
    pub fn resolve(state_file: Option<PathBuf>, dump_file: Option<PathBuf>) -> Result<Self> {
        let state_file = match state_file {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(ChargeError::config("state file path is empty"));
            }
            Some(path) => path,
            None => Self::default_state_file(),
        };

        Ok(Self {
            state_file,
            dump_file,
        })
    }

    pub fn default_state_file() -> PathBuf {
        match dirs::data_local_dir() {
            Some(dir) => dir.join(APP_DIR).join(STATE_FILE_NAME),
            None => {
                log::debug!("No local data directory, keeping state in the working directory");
                PathBuf::from(FALLBACK_STATE_FILE)
            }
        }
    }
}
