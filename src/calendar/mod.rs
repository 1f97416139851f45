//! Date-dimension core.
//!
//! Responsibilities:
//!
//! - derive per-day attributes (year, quarter, `%W` week, week interval, ...)
//! - classify a day as workday or holiday against an ordered holiday table
//! - expand an inclusive date range into attribute rows (optionally in parallel)
//! - apply configured overrides to a freshly fetched holiday table
//!
//! Everything here is synchronous and only reads the holiday table.

pub mod adjust;
pub mod attributes;
pub mod classify;
pub mod range;

pub use adjust::*;
pub use attributes::*;
pub use classify::*;
pub use range::*;
