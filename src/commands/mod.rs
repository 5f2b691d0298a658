// Command handlers module
pub mod report;

pub use report::execute as report;
