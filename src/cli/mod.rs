//! Command-line parsing for the date-dimension builder.
//!
//! Argument parsing and command dispatch stay separate from the calendar code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "datedim", version, about = "Date dimension builder with government holiday calendar")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build attribute rows for every day in an inclusive date range.
    Range(RangeArgs),
    /// Classify a single date and print its attributes.
    Classify(ClassifyArgs),
    /// Fetch the holiday table and save it for offline runs.
    Fetch(FetchArgs),
}

/// Where the holiday table comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// TOML config file (source and adjustment settings).
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Use a local holiday table (JSON or CSV) instead of the remote API.
    #[arg(long, value_name = "FILE")]
    pub holidays: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// First date (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub start: NaiveDate,

    /// Last date (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub end: NaiveDate,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Compute rows on the rayon thread pool.
    #[arg(long)]
    pub parallel: bool,

    /// Number of rows to print.
    #[arg(long, default_value_t = 14)]
    pub rows: usize,

    /// Export rows to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export rows to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    /// Date to classify (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Fetch data through this year.
    #[arg(long)]
    pub through_year: i32,

    /// Output file (.json or .csv).
    #[arg(short, long)]
    pub output: PathBuf,

    /// TOML config file (source and adjustment settings).
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Save the table as published, without configured overrides.
    #[arg(long)]
    pub raw: bool,
}
