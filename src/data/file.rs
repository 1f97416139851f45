//! Offline holiday source backed by a local JSON/CSV table.

use std::path::PathBuf;

use tracing::info;

use crate::data::HolidayFetcher;
use crate::domain::HolidayTable;
use crate::error::AppError;
use crate::io::read_holiday_table;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HolidayFetcher for FileSource {
    /// The whole file is returned regardless of `through_year`.
    fn fetch(&self, _through_year: i32) -> Result<HolidayTable, AppError> {
        let table = read_holiday_table(&self.path)?;
        info!(path = %self.path.display(), rows = table.len(), "holiday table loaded");
        Ok(table)
    }
}
