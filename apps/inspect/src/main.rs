#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use portico_inspect::{Cli, inspect};
use portico_logger::{LevelFilter, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .stderr(true)
        .level(if cli.verbose { LevelFilter::INFO } else { LevelFilter::WARN })
        .trace_attachment(cli.verbose);
    if let Some(dir) = &cli.log_dir {
        logger = logger.file(dir);
    }
    let _log = logger.init()?;

    let inspection = inspect(&cli)?;
    let json = serde_json::to_string_pretty(&inspection).context("Failed to render inspection")?;
    println!("{json}");

    Ok(())
}
