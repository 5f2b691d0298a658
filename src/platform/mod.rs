// Platform-specific code module

pub mod ioreg;

pub use ioreg::{DumpFileSource, IoregParser, IoregSource};
