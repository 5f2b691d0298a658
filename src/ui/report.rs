use crate::core::session::Report;
use colored::*;
use std::fmt::Write;

/// Millivolts as volts with three decimals
pub fn format_volts(millivolts: u32) -> String {
    format!("{:.3}V", f64::from(millivolts) / 1000.0)
}

fn section_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bold().green());
}

/// Render the human-readable battery report
pub fn format_report(report: &Report) -> String {
    let reading = &report.reading;
    let metrics = &report.metrics;
    let mut out = String::new();

    section_header(&mut out, "Precise Battery Information:");
    let _ = writeln!(out, "Raw Current Capacity: {} mAh", reading.raw_current);
    let _ = writeln!(out, "Raw Maximum Capacity: {} mAh", reading.raw_max);
    let _ = writeln!(out, "Precise Charge Level: {:.4}%", metrics.precise_percentage);
    let _ = writeln!(out, "Battery Voltage: {}", format_volts(reading.voltage));

    if let (Some(design), Some(health)) = (reading.design_capacity, metrics.health) {
        let _ = writeln!(out, "Design Capacity: {} mAh", design);
        let _ = writeln!(out, "Battery Health: {:.2}%", health);
    }

    if !reading.cell_voltages.is_empty() {
        section_header(&mut out, "Individual Cell Voltages:");
        for (i, mv) in reading.cell_voltages.iter().enumerate() {
            let _ = writeln!(out, "Cell {}: {}", i + 1, format_volts(*mv));
        }
    }

    let power = if reading.external_connected {
        "Connected to Power".green()
    } else {
        "On Battery".yellow()
    };
    let status = if reading.is_charging {
        "Charging".green()
    } else {
        "Not Charging".normal()
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "Power Status: {}", power);
    let _ = writeln!(out, "Battery Status: {}", status);

    if let Some(amperage) = reading.instant_amperage {
        let _ = writeln!(out, "Instant Amperage: {} mA", amperage);
    }

    if let Some(rate) = metrics.rate {
        let (label, target) = if reading.is_charging {
            ("Charging Rate", "Full")
        } else {
            ("Discharge Rate", "Empty")
        };

        let _ = writeln!(out, "{}: {:.1} mAh/hour", label, rate.mah_per_hour());
        if let Some(remaining) = metrics.time_remaining {
            let _ = writeln!(out, "Estimated Time to {}: {}", target, remaining);
        }
    }

    out
}

pub fn print_report(report: &Report) {
    print!("{}", format_report(report));
}
