//! Terminal formatting for range runs and single-date lookups.
//!
//! Formatting lives in one place so the calendar code stays free of
//! presentation concerns.

use chrono::NaiveDate;

use crate::app::pipeline::RunOutput;
use crate::domain::{DateAttributeRecord, HolidayCode};

/// Format the run summary (span, table size, workday/holiday counts).
pub fn format_run_summary(run: &RunOutput) -> String {
    let (workdays, holidays) = count_codes(&run.records);

    let mut out = String::new();
    out.push_str("=== datedim - date dimension ===\n");
    out.push_str(&format!("Range: {} .. {}\n", run.start, run.end));
    out.push_str(&format!("Holiday table: {} rows\n", run.table.len()));
    out.push_str(&format!(
        "Days: {} | workdays={} | holidays={}\n",
        run.records.len(),
        workdays,
        holidays
    ));
    out
}

/// Format up to `limit` rows as a fixed-width table.
pub fn format_rows(records: &[DateAttributeRecord], limit: usize) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>4} {:>1} {:>2} {:>2} {:>6} {:>6} {:>1} {:<21} {:>3}\n",
            "date", "year", "q", "m", "wk", "ym", "yw", "d", "week", "hol"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<4} {:-<1} {:-<2} {:-<2} {:-<6} {:-<6} {:-<1} {:-<21} {:-<3}\n",
            "", "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in records.iter().take(limit) {
        out.push_str(
            format!(
                "{:<10} {:>4} {:>1} {:>2} {:>2} {:>6} {:>6} {:>1} {:<21} {:>3}\n",
                r.data_date,
                r.data_year,
                r.data_quarter,
                r.data_month,
                r.data_week,
                r.data_year_to_month,
                r.data_year_to_week,
                r.data_week_to_day,
                r.data_year_to_week_interval,
                r.is_holiday.as_str(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if records.len() > limit {
        out.push_str(&format!("... {} more rows\n", records.len() - limit));
    }
    out
}

/// One-line verdict for `datedim classify`.
pub fn format_classification(date: NaiveDate, record: &DateAttributeRecord) -> String {
    let label = match record.is_holiday {
        HolidayCode::Workday => "workday",
        HolidayCode::Holiday => "holiday",
    };
    format!(
        "{date} {} ({label}) week={} interval={}",
        record.is_holiday, record.data_week, record.data_year_to_week_interval
    )
}

fn count_codes(records: &[DateAttributeRecord]) -> (usize, usize) {
    records.iter().fold((0, 0), |(w, h), r| match r.is_holiday {
        HolidayCode::Workday => (w + 1, h),
        HolidayCode::Holiday => (w, h + 1),
    })
}
