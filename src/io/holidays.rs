//! Read/write holiday tables on disk.
//!
//! Tables are stored either as a JSON array of `HolidayRecord` (what `fetch`
//! writes) or as a CSV with the same column names. The format is picked from
//! the file extension; anything other than `.csv` is treated as JSON.

use std::fs::File;
use std::path::Path;

use crate::domain::{HolidayRecord, HolidayTable};
use crate::error::AppError;

const CSV_HEADER: [&str; 5] = ["date", "name", "is_holiday", "category", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => TableFormat::Csv,
            _ => TableFormat::Json,
        }
    }
}

/// Read a holiday table, preserving row order.
pub fn read_holiday_table(path: &Path) -> Result<HolidayTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open holiday table '{}': {e}", path.display())))?;

    match TableFormat::from_path(path) {
        TableFormat::Json => serde_json::from_reader(file)
            .map_err(|e| AppError::usage(format!("Invalid holiday table JSON '{}': {e}", path.display()))),
        TableFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
            let mut table = HolidayTable::new();
            for (i, row) in reader.deserialize::<HolidayRecord>().enumerate() {
                // +2: 1-based lines plus the header.
                let record = row.map_err(|e| {
                    AppError::usage(format!("Invalid holiday table row {} in '{}': {e}", i + 2, path.display()))
                })?;
                table.push(record);
            }
            Ok(table)
        }
    }
}

/// Write a holiday table in the format implied by `path`.
pub fn write_holiday_table(path: &Path, table: &[HolidayRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create holiday table '{}': {e}", path.display())))?;

    match TableFormat::from_path(path) {
        TableFormat::Json => serde_json::to_writer_pretty(file, table)
            .map_err(|e| AppError::usage(format!("Failed to write holiday table JSON: {e}"))),
        TableFormat::Csv => {
            let mut writer = csv::Writer::from_writer(file);
            if table.is_empty() {
                // serde only emits the header alongside the first row.
                writer
                    .write_record(CSV_HEADER)
                    .map_err(|e| AppError::usage(format!("Failed to write holiday table header: {e}")))?;
            }
            for record in table {
                writer
                    .serialize(record)
                    .map_err(|e| AppError::usage(format!("Failed to write holiday table row: {e}")))?;
            }
            writer
                .flush()
                .map_err(|e| AppError::usage(format!("Failed to flush holiday table: {e}")))
        }
    }
}
