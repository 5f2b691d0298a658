use crate::core::config::Settings;
use crate::core::reading::ReadingSource;
use crate::core::sample_store::JsonFileStore;
use crate::core::session;
use crate::platform::{DumpFileSource, IoregSource};
use crate::ui::report::print_report;
use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use std::path::PathBuf;

/// Take a reading, print the report and remember the sample for next time
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let settings = Settings::resolve(
        matches.get_one::<PathBuf>("state-file").cloned(),
        matches.get_one::<PathBuf>("from-file").cloned(),
    )
    .context("Invalid settings")?;

    log::debug!("Using state file {:?}", settings.state_file);

    let source: Box<dyn ReadingSource> = match &settings.dump_file {
        Some(path) => Box::new(DumpFileSource::new(path)?),
        None => Box::new(IoregSource::new()?),
    };
    let mut store = JsonFileStore::new(&settings.state_file);

    match session::run(source.as_ref(), &mut store, Local::now()) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) if e.is_incomplete_reading() => {
            log::debug!("{}", e);
            println!("Error: Could not get complete battery information");
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Failed to read battery information"),
    }
}
