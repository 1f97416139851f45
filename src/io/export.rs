//! Export date-attribute rows to CSV or JSON.
//!
//! Column names are the upper-case `DATA_*` names downstream loaders expect.

use std::fs::File;
use std::path::Path;

use crate::domain::DateAttributeRecord;
use crate::error::AppError;

/// Write rows to a CSV file with a header line.
pub fn write_records_csv(path: &Path, records: &[DateAttributeRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut writer = csv::Writer::from_writer(file);
    if records.is_empty() {
        // serde only emits the header alongside the first row.
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;
    }
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))
}

/// Write rows as a pretty-printed JSON array.
pub fn write_records_json(path: &Path, records: &[DateAttributeRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, records)
        .map_err(|e| AppError::usage(format!("Failed to write export JSON: {e}")))
}

const CSV_HEADER: [&str; 11] = [
    "DATA_DATE",
    "DATA_YEAR",
    "DATA_QUARTER",
    "DATA_MONTH",
    "DATA_WEEK",
    "DATA_YEAR_TO_MONTH",
    "DATA_YEAR_TO_WEEK",
    "DATA_WEEK_TO_DAY",
    "DATA_YEAR_TO_WEEK_INTERVAL",
    "IS_HOLIDAY",
    "INSERT_DATE",
];
