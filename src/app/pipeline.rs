//! Shared pipeline used by every subcommand:
//! holiday source -> adjust -> date range -> attribute rows
//!
//! The front-end (`app.rs`) only decides which source to use and how to
//! present the result.

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::calendar::{AdjustOptions, adjust_holiday_table, compute_date_range, compute_date_range_par};
use crate::data::HolidayFetcher;
use crate::domain::{DateAttributeRecord, HolidayTable};
use crate::error::AppError;

/// All computed outputs of a single `datedim range` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub table: HolidayTable,
    pub records: Vec<DateAttributeRecord>,
}

/// Fetch the raw table through `through_year` and apply the overrides.
pub fn load_holiday_table(
    fetcher: &dyn HolidayFetcher,
    through_year: i32,
    opts: &AdjustOptions,
) -> Result<HolidayTable, AppError> {
    let raw = fetcher.fetch(through_year)?;
    let raw_rows = raw.len();
    let table = adjust_holiday_table(raw, opts);
    info!(raw_rows, rows = table.len(), "holiday table adjusted");
    Ok(table)
}

/// Execute the full range pipeline.
pub fn run_range(
    fetcher: &dyn HolidayFetcher,
    opts: &AdjustOptions,
    start: NaiveDate,
    end: NaiveDate,
    parallel: bool,
) -> Result<RunOutput, AppError> {
    let table = load_holiday_table(fetcher, start.max(end).year(), opts)?;
    Ok(run_range_with_table(table, start, end, parallel))
}

/// Execute the range step against an already prepared table.
pub fn run_range_with_table(
    table: HolidayTable,
    start: NaiveDate,
    end: NaiveDate,
    parallel: bool,
) -> RunOutput {
    if start > end {
        warn!(%start, %end, "start is after end, range is empty");
    }

    let records = if parallel {
        compute_date_range_par(start, end, &table)
    } else {
        compute_date_range(start, end, &table)
    };
    info!(rows = records.len(), parallel, "date attributes computed");

    RunOutput {
        start,
        end,
        table,
        records,
    }
}
