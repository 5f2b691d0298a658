// User interface and presentation module

pub mod report;

pub use report::{format_report, format_volts, print_report};
