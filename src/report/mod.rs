//! Reporting: terminal output for `datedim`.

pub mod format;

pub use format::{format_classification, format_rows, format_run_summary};
