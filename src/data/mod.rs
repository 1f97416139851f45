//! Holiday table sources.
//!
//! The calendar core only ever sees a finished `HolidayTable`; where it came
//! from is decided here, behind the `HolidayFetcher` seam.

pub mod file;
pub mod ntpc;

pub use file::FileSource;
pub use ntpc::NtpcClient;

use crate::domain::HolidayTable;
use crate::error::AppError;

/// Something that can produce the raw (unadjusted) holiday table.
pub trait HolidayFetcher {
    /// Fetch rows covering the source's history through `through_year`.
    fn fetch(&self, through_year: i32) -> Result<HolidayTable, AppError>;
}
