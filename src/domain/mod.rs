//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - holiday-table rows and their ternary flag (`HolidayRecord`, `HolidayFlag`)
//! - the workday/holiday output code (`HolidayCode`)
//! - the per-day output row (`DateAttributeRecord`)

pub mod types;

pub use types::*;
