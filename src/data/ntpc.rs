//! New Taipei City open-data holiday calendar.
//!
//! The dataset is served as JSON pages of `size` rows. One page is requested
//! per year since the dataset's first year; an empty page ends the walk early.
//! Failing pages are retried with exponential backoff and then skipped, so a
//! flaky page costs coverage rather than the whole run.

use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::data::HolidayFetcher;
use crate::domain::{HolidayFlag, HolidayRecord, HolidayTable, parse_holiday_timestamp};
use crate::error::AppError;

pub struct NtpcClient {
    client: Client,
    config: SourceConfig,
}

impl NtpcClient {
    pub fn new(config: SourceConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| AppError::usage(format!("Invalid [source].user_agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::data(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn fetch_page(&self, page: usize) -> Result<Vec<HolidayRecord>, AppError> {
        let mut attempt = 0u32;
        loop {
            match self.request_page(page) {
                Ok(body) => return parse_page(&body),
                Err(PageError::Retriable(msg)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    let wait = backoff(self.config.backoff_secs, attempt);
                    debug!(page, attempt, wait_secs = wait.as_secs(), error = %msg, "retrying holiday page");
                    thread::sleep(wait);
                }
                Err(PageError::Retriable(msg)) | Err(PageError::Fatal(msg)) => {
                    return Err(AppError::data(msg));
                }
            }
        }
    }

    fn request_page(&self, page: usize) -> Result<String, PageError> {
        let resp = self
            .client
            .get(&self.config.url)
            .query(&[("page", page), ("size", self.config.page_size)])
            .send()
            .map_err(|e| {
                let msg = format!("Holiday request for page {page} failed: {e}");
                if e.is_connect() || e.is_timeout() {
                    PageError::Retriable(msg)
                } else {
                    PageError::Fatal(msg)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let msg = format!("Holiday request for page {page} failed with status {status}.");
            return Err(if is_retriable_status(status) {
                PageError::Retriable(msg)
            } else {
                PageError::Fatal(msg)
            });
        }

        resp.text()
            .map_err(|e| PageError::Retriable(format!("Failed to read holiday page {page}: {e}")))
    }
}

impl HolidayFetcher for NtpcClient {
    fn fetch(&self, through_year: i32) -> Result<HolidayTable, AppError> {
        let pages = page_count(self.config.first_year, through_year);
        info!(url = %self.config.url, pages, size = self.config.page_size, "fetching holiday table");

        let table = collect_pages(pages, |page| self.fetch_page(page)).map_err(|err| {
            AppError::new(err.exit_code(), format!("{} from {}.", err.message(), self.config.url))
        })?;
        info!(rows = table.len(), "holiday table fetched");
        Ok(table)
    }
}

/// Walk pages `0..pages` in order and join their rows.
///
/// An empty page ends the walk. A page that fails is logged and skipped. If no
/// page produced a row the whole fetch fails.
fn collect_pages(
    pages: usize,
    mut fetch_page: impl FnMut(usize) -> Result<Vec<HolidayRecord>, AppError>,
) -> Result<HolidayTable, AppError> {
    let mut table = HolidayTable::new();
    for page in 0..pages {
        match fetch_page(page) {
            Ok(rows) if rows.is_empty() => {
                debug!(page, "empty holiday page, stopping");
                break;
            }
            Ok(rows) => {
                debug!(page, rows = rows.len(), "holiday page fetched");
                table.extend(rows);
            }
            Err(err) => {
                warn!(page, error = %err, "skipping holiday page");
            }
        }
    }

    if table.is_empty() {
        return Err(AppError::data("No holiday rows returned"));
    }
    Ok(table)
}

enum PageError {
    Retriable(String),
    Fatal(String),
}

#[derive(Debug, Deserialize)]
struct ApiHoliday {
    #[serde(alias = "Date")]
    date: String,
    #[serde(default, alias = "name")]
    chinese: Option<String>,
    #[serde(default)]
    isholiday: Option<String>,
    #[serde(default, alias = "category")]
    holidaycategory: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Number of pages requested for data through `through_year` (at least one).
fn page_count(first_year: i32, through_year: i32) -> usize {
    usize::try_from(through_year - first_year).unwrap_or(0).max(1)
}

fn is_retriable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Sleep before retry number `attempt` (1-based): `base * 2^(attempt - 1)`.
fn backoff(base_secs: u64, attempt: u32) -> Duration {
    let factor = 1u64 << attempt.saturating_sub(1).min(16);
    Duration::from_secs(base_secs.saturating_mul(factor))
}

/// Parse one JSON page into holiday rows.
///
/// Rows with an unparseable date are skipped with a warning; a body that is
/// not a JSON array of rows is an error.
fn parse_page(body: &str) -> Result<Vec<HolidayRecord>, AppError> {
    let rows: Vec<ApiHoliday> = serde_json::from_str(body)
        .map_err(|e| AppError::data(format!("Failed to parse holiday page: {e}")))?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(date) = parse_holiday_timestamp(&row.date) else {
            warn!(date = %row.date, "skipping holiday row with invalid date");
            continue;
        };
        out.push(HolidayRecord {
            date,
            name: row.chinese.unwrap_or_default(),
            is_holiday: HolidayFlag::from(row.isholiday),
            category: row.holidaycategory.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::midnight;
    use chrono::NaiveDate;

    #[test]
    fn parse_page_maps_source_fields() {
        let body = r#"[
            {"date": "2024/2/8", "chinese": "農曆除夕", "isholiday": "是", "holidaycategory": "春節", "description": "全國放假"},
            {"date": "2024/2/17", "chinese": "", "isholiday": "否", "holidaycategory": "補行上班日", "description": ""},
            {"date": "bogus", "isholiday": "是"}
        ]"#;
        let rows = parse_page(body).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, midnight(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap()));
        assert_eq!(rows[0].name, "農曆除夕");
        assert_eq!(rows[0].is_holiday, HolidayFlag::Yes);
        assert_eq!(rows[0].category, "春節");
        assert_eq!(rows[0].description, "全國放假");

        assert_eq!(rows[1].is_holiday, HolidayFlag::No);
        assert_eq!(rows[1].category, "補行上班日");
    }

    #[test]
    fn parse_page_accepts_capitalised_date_and_nulls() {
        let body = r#"[{"Date": "2024-10-10", "isholiday": null, "description": null}]"#;
        let rows = parse_page(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].is_holiday, HolidayFlag::Unset);
        assert!(rows[0].description.is_empty());
    }

    #[test]
    fn empty_page_parses_to_no_rows() {
        assert!(parse_page("[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_body_is_an_error() {
        let err = parse_page(r#"{"error": "rate limited"}"#).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }

    fn rows_for(page: usize) -> Vec<HolidayRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(page as i64);
        vec![HolidayRecord::on(date, HolidayFlag::Yes, "")]
    }

    #[test]
    fn collect_pages_stops_at_first_empty_page() {
        let mut requested = Vec::new();
        let table = collect_pages(5, |page| {
            requested.push(page);
            Ok(if page < 2 { rows_for(page) } else { Vec::new() })
        })
        .unwrap();
        assert_eq!(requested, vec![0, 1, 2]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn collect_pages_skips_failed_page_and_joins_the_rest() {
        let table = collect_pages(3, |page| {
            if page == 1 {
                Err(AppError::data("status 503"))
            } else {
                Ok(rows_for(page))
            }
        })
        .unwrap();
        assert_eq!(table, [rows_for(0), rows_for(2)].concat());
    }

    #[test]
    fn collect_pages_without_rows_is_a_data_error() {
        let err = collect_pages(3, |_| Ok(Vec::new())).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);

        let err = collect_pages(3, |_| Err(AppError::data("down"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }

    #[test]
    fn page_count_follows_years_since_first() {
        assert_eq!(page_count(2013, 2024), 11);
        assert_eq!(page_count(2013, 2014), 1);
        assert_eq!(page_count(2013, 2013), 1);
        assert_eq!(page_count(2013, 2000), 1);
    }

    #[test]
    fn only_gateway_style_statuses_retry() {
        assert!(is_retriable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retriable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retriable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retriable_status(StatusCode::GATEWAY_TIMEOUT));
        assert!(!is_retriable_status(StatusCode::NOT_FOUND));
        assert!(!is_retriable_status(StatusCode::TOO_MANY_REQUESTS));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff(1, 1), Duration::from_secs(1));
        assert_eq!(backoff(1, 2), Duration::from_secs(2));
        assert_eq!(backoff(1, 3), Duration::from_secs(4));
        assert_eq!(backoff(0, 3), Duration::ZERO);
    }

    #[test]
    fn client_rejects_invalid_user_agent() {
        let config = SourceConfig {
            user_agent: "bad\nagent".to_string(),
            ..SourceConfig::default()
        };
        assert!(NtpcClient::new(config).is_err());
    }
}
