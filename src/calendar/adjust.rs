//! Post-fetch overrides applied to the raw holiday table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{HolidayFlag, HolidayRecord, HolidayTable, midnight};

/// Category label the source uses for make-up workdays.
pub const MAKE_UP_WORKDAY_CATEGORY: &str = "補行上班日";
/// Category label given to appended special holidays.
pub const SPECIAL_HOLIDAY_CATEGORY: &str = "特殊假日";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustOptions {
    /// Keep make-up workday rows as published. When false they are forced to `No`.
    pub make_up_day: bool,
    /// Dates forced to `No` wherever they appear in the table.
    pub not_holidays: BTreeSet<NaiveDate>,
    /// Dates appended to the end of the table as holidays.
    pub special_holidays: BTreeSet<NaiveDate>,
    pub make_up_category: String,
    pub special_category: String,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            make_up_day: false,
            not_holidays: BTreeSet::new(),
            special_holidays: BTreeSet::new(),
            make_up_category: MAKE_UP_WORKDAY_CATEGORY.to_string(),
            special_category: SPECIAL_HOLIDAY_CATEGORY.to_string(),
        }
    }
}

/// Apply the overrides to `raw`, in this order:
///
/// 1. unless `make_up_day`, rows in the make-up category become `No`
/// 2. rows dated on an excluded day become `No`
/// 3. each special holiday is appended as a `Yes` row
///
/// Appended rows sit after every published row, so the classifier only
/// reaches them when nothing earlier matched the same timestamp.
pub fn adjust_holiday_table(mut raw: HolidayTable, opts: &AdjustOptions) -> HolidayTable {
    if !opts.make_up_day {
        let mut forced = 0usize;
        for record in raw.iter_mut().filter(|r| r.category == opts.make_up_category) {
            record.is_holiday = HolidayFlag::No;
            forced += 1;
        }
        debug!(rows = forced, "make-up workdays forced to non-holiday");
    }

    if !opts.not_holidays.is_empty() {
        let excluded: BTreeSet<_> = opts.not_holidays.iter().map(|d| midnight(*d)).collect();
        for record in raw.iter_mut().filter(|r| excluded.contains(&r.date)) {
            record.is_holiday = HolidayFlag::No;
        }
    }

    raw.reserve(opts.special_holidays.len());
    for date in &opts.special_holidays {
        raw.push(HolidayRecord::on(*date, HolidayFlag::Yes, opts.special_category.clone()));
    }

    raw
}
