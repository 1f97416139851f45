//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads config and picks the holiday source
//! - runs the date pipeline
//! - prints reports and writes optional exports

use chrono::Datelike;
use clap::Parser;
use tracing::info;

use crate::cli::{ClassifyArgs, Command, FetchArgs, RangeArgs, SourceArgs};
use crate::config::AppConfig;
use crate::data::{FileSource, HolidayFetcher, NtpcClient};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `datedim` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Range(args) => handle_range(args),
        Command::Classify(args) => handle_classify(args),
        Command::Fetch(args) => handle_fetch(args),
    }
}

fn handle_range(args: RangeArgs) -> Result<(), AppError> {
    let config = AppConfig::load(args.source.config.as_deref())?;
    let source = holiday_source(&args.source, &config)?;
    let run = pipeline::run_range(
        source.as_ref(),
        &config.adjust.to_options(),
        args.start,
        args.end,
        args.parallel,
    )?;

    println!("{}", crate::report::format_run_summary(&run));
    println!("{}", crate::report::format_rows(&run.records, args.rows));

    if let Some(path) = &args.export {
        crate::io::write_records_csv(path, &run.records)?;
        info!(path = %path.display(), "CSV export written");
    }
    if let Some(path) = &args.export_json {
        crate::io::write_records_json(path, &run.records)?;
        info!(path = %path.display(), "JSON export written");
    }

    Ok(())
}

fn handle_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load(args.source.config.as_deref())?;
    let source = holiday_source(&args.source, &config)?;
    let table =
        pipeline::load_holiday_table(source.as_ref(), args.date.year(), &config.adjust.to_options())?;

    let record = crate::calendar::date_attributes(args.date, &table);
    println!("{}", crate::report::format_classification(args.date, &record));
    Ok(())
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let config = AppConfig::load(args.config.as_deref())?;
    let client = NtpcClient::new(config.source.clone())?;

    let table = if args.raw {
        client.fetch(args.through_year)?
    } else {
        pipeline::load_holiday_table(&client, args.through_year, &config.adjust.to_options())?
    };

    crate::io::write_holiday_table(&args.output, &table)?;
    println!("Wrote {} holiday rows to {}", table.len(), args.output.display());
    Ok(())
}

/// A local table when `--holidays` is given, otherwise the remote API.
fn holiday_source(args: &SourceArgs, config: &AppConfig) -> Result<Box<dyn HolidayFetcher>, AppError> {
    match &args.holidays {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(NtpcClient::new(config.source.clone())?)),
    }
}
