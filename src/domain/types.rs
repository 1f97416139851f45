//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed read-only through the calendar core
//! - written to CSV/JSON exports
//! - reloaded later as an offline holiday table

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout used when holiday tables are written to disk.
pub const HOLIDAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout of `INSERT_DATE` in exports.
pub const INSERT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Whether a holiday-table row declares its date a day off.
///
/// The source API uses `是` / `否`; tables written by this tool use
/// `yes` / `no`. Anything unrecognised (including a missing value) is `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum HolidayFlag {
    Yes,
    No,
    #[default]
    Unset,
}

impl HolidayFlag {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "是" | "yes" | "y" | "true" => HolidayFlag::Yes,
            "否" | "no" | "n" | "false" => HolidayFlag::No,
            _ => HolidayFlag::Unset,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HolidayFlag::Yes => "yes",
            HolidayFlag::No => "no",
            HolidayFlag::Unset => "",
        }
    }
}

impl From<Option<String>> for HolidayFlag {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(HolidayFlag::parse).unwrap_or_default()
    }
}

impl From<HolidayFlag> for &'static str {
    fn from(value: HolidayFlag) -> Self {
        value.as_str()
    }
}

/// One row of the holiday table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    #[serde(with = "holiday_timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_holiday: HolidayFlag,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl HolidayRecord {
    /// A row dated at midnight of `date` with empty text fields.
    pub fn on(date: NaiveDate, is_holiday: HolidayFlag, category: impl Into<String>) -> Self {
        Self {
            date: midnight(date),
            name: String::new(),
            is_holiday,
            category: category.into(),
            description: String::new(),
        }
    }
}

/// Ordered holiday rows. Order is significant: the first exact-date match wins.
pub type HolidayTable = Vec<HolidayRecord>;

/// Workday/holiday code written to `IS_HOLIDAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum HolidayCode {
    /// `"1"`
    Workday,
    /// `"2"`
    Holiday,
}

impl HolidayCode {
    pub fn as_str(self) -> &'static str {
        match self {
            HolidayCode::Workday => "1",
            HolidayCode::Holiday => "2",
        }
    }
}

impl std::fmt::Display for HolidayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for HolidayCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(HolidayCode::Workday),
            "2" => Ok(HolidayCode::Holiday),
            other => Err(format!("invalid IS_HOLIDAY code '{other}' (expected \"1\" or \"2\")")),
        }
    }
}

impl From<HolidayCode> for &'static str {
    fn from(value: HolidayCode) -> Self {
        value.as_str()
    }
}

/// One output row of the date dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DateAttributeRecord {
    pub data_date: String,
    pub data_year: i32,
    pub data_quarter: u32,
    pub data_month: u32,
    pub data_week: u32,
    pub data_year_to_month: i64,
    pub data_year_to_week: i64,
    pub data_week_to_day: u32,
    pub data_year_to_week_interval: String,
    pub is_holiday: HolidayCode,
    /// Wall-clock time the row was computed, not the business date.
    #[serde(with = "insert_timestamp")]
    pub insert_date: NaiveDateTime,
}

/// `date` at `00:00:00`, the granularity holiday rows are matched at.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parse a holiday-table date as published by the source or written by us.
///
/// Date-only values are taken at midnight.
pub fn parse_holiday_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    const DATE_FMTS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%Y%m%d"];

    let s = raw.trim();
    for fmt in DATETIME_FMTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(midnight(d));
        }
    }
    None
}

mod holiday_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{HOLIDAY_TIMESTAMP_FORMAT, parse_holiday_timestamp};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(HOLIDAY_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_holiday_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid holiday date '{raw}'")))
    }
}

mod insert_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::INSERT_DATE_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(INSERT_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f").map_err(serde::de::Error::custom)
    }
}
