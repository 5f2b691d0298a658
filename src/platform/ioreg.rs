use crate::core::reading::{decode_amperage, Reading, ReadingSource};
use crate::error::{ChargeError, Result};
use regex::Regex;
use std::fs;
use std::path::PathBuf;

/// Smart battery registry class queried on macOS
pub const BATTERY_CLASS: &str = "AppleSmartBattery";

/// Extracts battery fields from `ioreg -r -c AppleSmartBattery -w0` output.
///
/// Only `"Key" = value` property lines are considered, optionally behind the
/// `|` tree prefix, so entries nested inside dictionaries (e.g. `BatteryData`)
/// never shadow the real values.
pub struct IoregParser {
    line: Regex,
    list: Regex,
}

impl IoregParser {
    pub fn new() -> Result<Self> {
        let line = Regex::new(r#"^[\s|]*"(?P<key>[A-Za-z]+)"\s*=\s*(?P<value>.+?)\s*$"#)
            .map_err(|e| ChargeError::other(format!("Invalid registry line pattern: {}", e)))?;
        let list = Regex::new(r"^\(([\d,\s]+)\)$")
            .map_err(|e| ChargeError::other(format!("Invalid registry list pattern: {}", e)))?;

        Ok(Self { line, list })
    }

    pub fn parse(&self, output: &str) -> Reading {
        let mut reading = Reading::default();

        for caps in output.lines().filter_map(|l| self.line.captures(l)) {
            let value = &caps["value"];

            match &caps["key"] {
                "AppleRawCurrentCapacity" => reading.raw_current = parse_u32(value),
                "AppleRawMaxCapacity" => reading.raw_max = parse_u32(value),
                "Voltage" => reading.voltage = parse_u32(value),
                "DesignCapacity" => reading.design_capacity = parse_u32(value),
                "CellVoltage" => {
                    if let Some(cells) = self.parse_list(value) {
                        reading.cell_voltages = cells;
                    }
                }
                "IsCharging" => reading.is_charging = value == "Yes",
                "ExternalConnected" => reading.external_connected = value == "Yes",
                "InstantAmperage" => reading.instant_amperage = parse_amperage(value),
                _ => {}
            }
        }

        reading
    }

    fn parse_list(&self, value: &str) -> Option<Vec<u32>> {
        let inner = self.list.captures(value)?.get(1)?.as_str();
        inner
            .split(',')
            .map(|v| v.trim().parse::<u32>().ok())
            .collect()
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.parse().ok()
}

fn parse_amperage(value: &str) -> Option<i32> {
    if value.starts_with('-') {
        return value.parse::<i64>().ok().and_then(|v| i32::try_from(v).ok());
    }
    value.parse::<u64>().ok().map(decode_amperage)
}

/// Queries the live hardware registry
pub struct IoregSource {
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    parser: IoregParser,
}

impl IoregSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: IoregParser::new()?,
        })
    }
}

impl ReadingSource for IoregSource {
    #[cfg(target_os = "macos")]
    fn read(&self) -> Result<Reading> {
        use std::process::Command;

        let output = Command::new("ioreg")
            .args(["-r", "-c", BATTERY_CLASS, "-w0"])
            .output()
            .map_err(|e| ChargeError::reading_source(format!("Failed to run ioreg: {}", e)))?;

        if !output.status.success() {
            return Err(ChargeError::reading_source(format!(
                "ioreg exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        log::debug!("ioreg returned {} bytes", stdout.len());

        Ok(self.parser.parse(&stdout))
    }

    #[cfg(not(target_os = "macos"))]
    fn read(&self) -> Result<Reading> {
        Err(ChargeError::unsupported(
            "battery registry queries are only available on macOS (use --from-file with a captured ioreg dump)",
        ))
    }
}

/// Reads a previously captured registry dump from disk
pub struct DumpFileSource {
    path: PathBuf,
    parser: IoregParser,
}

impl DumpFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            parser: IoregParser::new()?,
        })
    }
}

impl ReadingSource for DumpFileSource {
    fn read(&self) -> Result<Reading> {
        let dump = fs::read_to_string(&self.path).map_err(|e| {
            ChargeError::reading_source(format!("Failed to read {:?}: {}", self.path, e))
        })?;
        Ok(self.parser.parse(&dump))
    }
}
