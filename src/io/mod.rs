//! Input/output helpers.
//!
//! - holiday table read/write, JSON or CSV (`holidays`)
//! - date-attribute exports, CSV or JSON (`export`)

pub mod export;
pub mod holidays;

pub use export::*;
pub use holidays::*;
