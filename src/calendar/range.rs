//! Inclusive date-range expansion into attribute rows.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::calendar::attributes::date_attributes;
use crate::domain::{DateAttributeRecord, HolidayRecord};

/// One attribute row per day in `[start, end]`, ascending.
///
/// `start > end` yields an empty vector.
pub fn compute_date_range(
    start: NaiveDate,
    end: NaiveDate,
    table: &[HolidayRecord],
) -> Vec<DateAttributeRecord> {
    days_inclusive(start, end)
        .map(|date| date_attributes(date, table))
        .collect()
}

/// Same rows as [`compute_date_range`], computed across the rayon pool.
///
/// The holiday table is only read, so it is shared by reference between
/// workers. Output order is still ascending by date.
pub fn compute_date_range_par(
    start: NaiveDate,
    end: NaiveDate,
    table: &[HolidayRecord],
) -> Vec<DateAttributeRecord> {
    let dates: Vec<NaiveDate> = days_inclusive(start, end).collect();
    dates
        .par_iter()
        .map(|&date| date_attributes(date, table))
        .collect()
}

/// Iterate every calendar day from `start` through `end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::attributes::date_attributes_at;
    use crate::domain::{HolidayCode, HolidayFlag};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day_range_matches_calculator() {
        let table = vec![HolidayRecord::on(d(2024, 1, 1), HolidayFlag::Yes, "開國紀念日")];
        let rows = compute_date_range(d(2024, 1, 1), d(2024, 1, 1), &table);
        assert_eq!(rows.len(), 1);

        let expected = date_attributes_at(d(2024, 1, 1), &table, rows[0].insert_date);
        assert_eq!(rows[0], expected);
        assert_eq!(rows[0].is_holiday, HolidayCode::Holiday);
    }

    #[test]
    fn range_is_inclusive_and_ascending() {
        let rows = compute_date_range(d(2024, 2, 27), d(2024, 3, 2), &[]);
        let dates: Vec<&str> = rows.iter().map(|r| r.data_date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(compute_date_range(d(2024, 3, 2), d(2024, 3, 1), &[]).is_empty());
        assert!(compute_date_range_par(d(2024, 3, 2), d(2024, 3, 1), &[]).is_empty());
    }

    #[test]
    fn parallel_matches_sequential_ignoring_insert_date() {
        let table = vec![
            HolidayRecord::on(d(2023, 12, 30), HolidayFlag::Yes, ""),
            HolidayRecord::on(d(2024, 2, 8), HolidayFlag::Yes, ""),
        ];
        let seq = compute_date_range(d(2023, 12, 1), d(2024, 3, 31), &table);
        let mut par = compute_date_range_par(d(2023, 12, 1), d(2024, 3, 31), &table);
        assert_eq!(seq.len(), par.len());
        for (s, p) in seq.iter().zip(par.iter_mut()) {
            p.insert_date = s.insert_date;
            assert_eq!(s, p);
        }
    }

    #[test]
    fn range_crossing_year_end() {
        let rows = compute_date_range(d(2024, 12, 30), d(2025, 1, 1), &[]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].data_year, 2025);
        assert_eq!(rows[2].data_week, 1);
        assert_eq!(rows[2].data_year_to_week_interval, "2024/12/30-2025/01/05");
    }
}
