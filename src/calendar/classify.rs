//! Workday/holiday classification against an ordered holiday table.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::domain::{HolidayCode, HolidayFlag, HolidayRecord, midnight};

/// Classify `date` as workday (`"1"`) or holiday (`"2"`).
///
/// Rows are scanned in table order and each row is checked in this sequence:
///
/// 1. same timestamp and flagged `Yes` -> `Holiday`
/// 2. same timestamp and flagged `No` -> `Workday`
/// 3. `date` is a Saturday or Sunday -> `Holiday`
/// 4. otherwise remember `Workday` and move to the next row
///
/// Rule 3 returns on the first row that does not decide the date, so a weekend
/// date is only reported as a workday when the very first row is an exact `No`
/// match. Timestamps are compared at full date-time granularity: the target is
/// `date` at midnight.
///
/// An empty table is classified as if one non-matching row had been seen:
/// weekends are holidays, weekdays are workdays.
pub fn classify_holiday(date: NaiveDate, table: &[HolidayRecord]) -> HolidayCode {
    if table.is_empty() {
        debug!(%date, "empty holiday table, falling back to weekend rule");
        return weekend_fallback(date);
    }

    let target = midnight(date);
    let mut code = HolidayCode::Workday;
    for record in table {
        let same_date = record.date == target;
        if same_date && record.is_holiday == HolidayFlag::Yes {
            return HolidayCode::Holiday;
        } else if same_date && record.is_holiday == HolidayFlag::No {
            return HolidayCode::Workday;
        } else if is_weekend(date) {
            return HolidayCode::Holiday;
        } else {
            code = HolidayCode::Workday;
        }
    }
    code
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn weekend_fallback(date: NaiveDate) -> HolidayCode {
    if is_weekend(date) {
        HolidayCode::Holiday
    } else {
        HolidayCode::Workday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: NaiveDate, flag: HolidayFlag) -> HolidayRecord {
        HolidayRecord::on(date, flag, "")
    }

    #[test]
    fn weekday_without_match_is_workday() {
        // 2024-01-03 is a Wednesday.
        let table = vec![row(d(2024, 1, 1), HolidayFlag::Yes), row(d(2024, 2, 8), HolidayFlag::Yes)];
        assert_eq!(classify_holiday(d(2024, 1, 3), &table), HolidayCode::Workday);
    }

    #[test]
    fn exact_yes_match_is_holiday_on_weekday() {
        let table = vec![row(d(2024, 1, 1), HolidayFlag::Yes)];
        assert_eq!(classify_holiday(d(2024, 1, 1), &table), HolidayCode::Holiday);
    }

    #[test]
    fn exact_no_match_is_workday_even_on_saturday() {
        // 2024-02-17 is a Saturday make-up workday.
        let table = vec![row(d(2024, 2, 17), HolidayFlag::No)];
        assert_eq!(classify_holiday(d(2024, 2, 17), &table), HolidayCode::Workday);
    }

    #[test]
    fn saturday_with_mismatched_row_is_holiday() {
        let table = vec![row(d(2024, 1, 1), HolidayFlag::Yes)];
        assert_eq!(classify_holiday(d(2024, 1, 6), &table), HolidayCode::Holiday);
    }

    #[test]
    fn weekend_short_circuits_before_a_later_no_row() {
        // The first row does not match, so the weekend rule wins before the
        // override further down the table is reached.
        let table = vec![row(d(2024, 1, 1), HolidayFlag::Yes), row(d(2024, 2, 17), HolidayFlag::No)];
        assert_eq!(classify_holiday(d(2024, 2, 17), &table), HolidayCode::Holiday);
    }

    #[test]
    fn first_matching_row_wins() {
        let table = vec![row(d(2024, 4, 4), HolidayFlag::No), row(d(2024, 4, 4), HolidayFlag::Yes)];
        assert_eq!(classify_holiday(d(2024, 4, 4), &table), HolidayCode::Workday);
    }

    #[test]
    fn unset_flag_falls_through_to_weekday_rules() {
        let table = vec![row(d(2024, 4, 4), HolidayFlag::Unset)];
        assert_eq!(classify_holiday(d(2024, 4, 4), &table), HolidayCode::Workday);

        let table = vec![row(d(2024, 4, 6), HolidayFlag::Unset)];
        assert_eq!(classify_holiday(d(2024, 4, 6), &table), HolidayCode::Holiday);
    }

    #[test]
    fn non_midnight_row_does_not_match() {
        let mut noon = row(d(2024, 4, 4), HolidayFlag::Yes);
        noon.date = d(2024, 4, 4).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(classify_holiday(d(2024, 4, 4), &[noon]), HolidayCode::Workday);
    }

    #[test]
    fn empty_table_uses_weekend_rule() {
        assert_eq!(classify_holiday(d(2024, 1, 5), &[]), HolidayCode::Workday);
        assert_eq!(classify_holiday(d(2024, 1, 6), &[]), HolidayCode::Holiday);
        assert_eq!(classify_holiday(d(2024, 1, 7), &[]), HolidayCode::Holiday);
    }
}
