//! Command-line interface for ArthaVision
//!
//! Runs the local analysers against values given on the command line or
//! JSON files, printing tables or the canonical report to stdout.

mod commands;

use anyhow::Context;
use artha_stock::AnalysisConfig;
use artha_utils::LogFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "artha")]
#[command(about = "Local analytics for IDX equities: brokers, sector averages, price deviation, reports", long_about = None)]
struct Args {
    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value = "pretty", value_parser = parse_log_format)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify comma-separated broker codes, e.g. "yp, bk, ms"
    Brokers {
        codes: String,
    },
    /// Deviation of price from the top-3 broker average
    Deviation {
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        #[arg(long, allow_hyphen_values = true)]
        reference: String,
    },
    /// Sector averages from a JSON array of peer ratios
    Sector {
        file: PathBuf,
    },
    /// Canonical tactical report from an AI result JSON
    Report {
        file: PathBuf,
        /// Stock code for the report header
        #[arg(long)]
        code: String,
    },
    /// Enriched tactical request JSON from an analyst form JSON
    Request {
        file: PathBuf,
    },
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    LogFormat::parse(raw).ok_or_else(|| format!("unknown log format: {raw}"))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    artha_utils::init_tracing_with(args.log_format);

    let config = AnalysisConfig::default().with_env_overrides();
    config.validate().context("invalid ARTHA_* configuration")?;
    info!(command = ?args.command, "starting artha");

    let output = match args.command {
        Command::Brokers { codes } => commands::brokers(&codes),
        Command::Deviation { price, reference } => {
            commands::deviation(&price, &reference, &config)
        }
        Command::Sector { file } => commands::sector(&read_file(&file)?)?,
        Command::Report { file, code } => commands::report(&read_file(&file)?, &code)?,
        Command::Request { file } => commands::request(&read_file(&file)?, &config)?,
    };

    println!("{output}");
    Ok(())
}
