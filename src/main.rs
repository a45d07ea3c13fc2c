//! yatof CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use yatof::cli::args::*;
use yatof::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = YatofArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    // RUST_LOG still refines the level chosen by the flags.
    Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: YatofArgs) -> anyhow::Result<()> {
    let action = match &args.command {
        Command::Filter(_) => "failed to filter text",
        Command::ListFilters => "failed to list filters",
    };
    execute_command(args).context(action)
}
