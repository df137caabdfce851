mod batch_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod project;
mod query_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Snapshot(args) => query_cmd::run_snapshot(args),
        Command::Range(args) => query_cmd::run_range(args),
        Command::Quantiles(args) => query_cmd::run_quantiles(args),
        Command::Anomalies(args) => query_cmd::run_anomalies(args),
        Command::Batch(args) => batch_cmd::run(args),
    }
}
