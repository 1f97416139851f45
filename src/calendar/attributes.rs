//! Per-day calendar attributes.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::calendar::classify::classify_holiday;
use crate::domain::{DateAttributeRecord, HolidayRecord};

/// Compute the attribute row for `date`, stamped with the current local time.
pub fn date_attributes(date: NaiveDate, table: &[HolidayRecord]) -> DateAttributeRecord {
    date_attributes_at(date, table, Local::now().naive_local())
}

/// Compute the attribute row for `date` with an explicit `INSERT_DATE`.
pub fn date_attributes_at(
    date: NaiveDate,
    table: &[HolidayRecord],
    inserted_at: NaiveDateTime,
) -> DateAttributeRecord {
    let year = date.year();
    let month = date.month();
    let week = monday_week_of_year(date);

    DateAttributeRecord {
        data_date: date.format("%Y-%m-%d").to_string(),
        data_year: year,
        data_quarter: quarter(month),
        data_month: month,
        data_week: week + 1,
        data_year_to_month: i64::from(year) * 100 + i64::from(month),
        // +1 lands on the combined YYYYWW integer, not on the week alone.
        data_year_to_week: i64::from(year) * 100 + i64::from(week) + 1,
        data_week_to_day: date.weekday().number_from_monday(),
        data_year_to_week_interval: week_interval(date),
        is_holiday: classify_holiday(date, table),
        insert_date: inserted_at,
    }
}

/// Quarter of a 1-based month.
pub fn quarter(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Week of the year with Monday as the first day of the week (`%W`).
///
/// Days before the first Monday of the year fall in week 0, so the result is
/// in `0..=53`.
pub fn monday_week_of_year(date: NaiveDate) -> u32 {
    (date.ordinal0() + 7 - date.weekday().num_days_from_monday()) / 7
}

/// Monday-to-Sunday span containing `date`, as `YYYY/MM/DD-YYYY/MM/DD`.
pub fn week_interval(date: NaiveDate) -> String {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);
    format!("{}-{}", monday.format("%Y/%m/%d"), sunday.format("%Y/%m/%d"))
}
