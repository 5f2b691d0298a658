use crate::error::{ChargeError, Result};

/// Instantaneous battery telemetry as reported by the hardware registry.
///
/// Every numeric field may be absent; a source fills in whatever it managed
/// to extract and leaves the rest as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    /// Current capacity in mAh
    pub raw_current: Option<u32>,
    /// Current maximum capacity in mAh
    pub raw_max: Option<u32>,
    /// Pack voltage in mV
    pub voltage: Option<u32>,
    /// Capacity when new, in mAh
    pub design_capacity: Option<u32>,
    /// Per-cell voltages in mV, in pack order
    pub cell_voltages: Vec<u32>,
    pub is_charging: bool,
    pub external_connected: bool,
    /// Instantaneous current in mA, negative while discharging
    pub instant_amperage: Option<i32>,
}

impl Reading {
    /// Promote to a [`CompleteReading`] if the mandatory fields are usable.
    ///
    /// A zero value counts as missing: the registry reports zero when it has
    /// no data, and a zero maximum capacity makes the percentage undefined.
    pub fn complete(&self) -> Result<CompleteReading> {
        let present = |v: Option<u32>| v.filter(|&x| x > 0);

        match (
            present(self.raw_current),
            present(self.raw_max),
            present(self.voltage),
        ) {
            (Some(raw_current), Some(raw_max), Some(voltage)) => Ok(CompleteReading {
                raw_current,
                raw_max,
                voltage,
                design_capacity: self.design_capacity.filter(|&d| d > 0),
                cell_voltages: self.cell_voltages.clone(),
                is_charging: self.is_charging,
                external_connected: self.external_connected,
                instant_amperage: self.instant_amperage,
            }),
            (current, max, voltage) => {
                let mut missing = Vec::new();
                if current.is_none() {
                    missing.push("raw_current");
                }
                if max.is_none() {
                    missing.push("raw_max");
                }
                if voltage.is_none() {
                    missing.push("voltage");
                }
                Err(ChargeError::incomplete(missing))
            }
        }
    }
}

/// A reading with capacity, maximum capacity and voltage all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteReading {
    pub raw_current: u32,
    pub raw_max: u32,
    pub voltage: u32,
    pub design_capacity: Option<u32>,
    pub cell_voltages: Vec<u32>,
    pub is_charging: bool,
    pub external_connected: bool,
    pub instant_amperage: Option<i32>,
}

/// Anything that can produce a [`Reading`] for the current instant.
pub trait ReadingSource {
    fn read(&self) -> Result<Reading>;
}

/// Decode a registry amperage value into signed milliamps.
///
/// The registry stores the current as an unsigned integer; only the low 32
/// bits are meaningful and they hold a two's complement value. Some versions
/// print it sign-extended to 64 bits, which the truncation handles too.
pub fn decode_amperage(raw: u64) -> i32 {
    raw as u32 as i32
}
