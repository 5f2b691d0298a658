use anyhow::Result;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;

use charge::commands;
use charge::core::config::STATE_FILE_ENV;

fn build_cli() -> Command {
    Command::new("charge")
        .about("Precise battery charge, health and charge rate from the hardware registry")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .value_name("PATH")
                .env(STATE_FILE_ENV)
                .help("Where the last sample is kept between runs")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("from-file")
                .long("from-file")
                .value_name("PATH")
                .help("Parse a captured `ioreg -r -c AppleSmartBattery -w0` dump instead of querying the hardware")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn main() -> Result<()> {
    charge::init_logging();

    let matches = build_cli().get_matches();

    commands::report(&matches)
}
