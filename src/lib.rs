//! `date-dim` library crate.
//!
//! Builds a date dimension: per-day calendar attributes plus a workday/holiday
//! flag taken from a government holiday calendar.
//!
//! The binary (`datedim`) is a thin wrapper around this library so the
//! calendar logic is testable without spawning processes.

pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;

pub use calendar::{
    AdjustOptions, adjust_holiday_table, classify_holiday, compute_date_range, compute_date_range_par,
    date_attributes, date_attributes_at,
};
pub use domain::{DateAttributeRecord, HolidayCode, HolidayFlag, HolidayRecord, HolidayTable};
