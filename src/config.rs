//! TOML configuration for the holiday source and table overrides.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calendar::{AdjustOptions, MAKE_UP_WORKDAY_CATEGORY, SPECIAL_HOLIDAY_CATEGORY};
use crate::error::AppError;

/// Environment variable that overrides `[source].url`.
pub const URL_ENV: &str = "HOLIDAY_API_URL";

const DEFAULT_URL: &str =
    "https://data.ntpc.gov.tw/api/datasets/308DCD75-6434-45BC-A95F-584DA4FED251/json";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Remote holiday dataset settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Overrides applied after fetching.
    #[serde(default)]
    pub adjust: AdjustConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// First year covered by the dataset; one page is requested per year after it.
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            page_size: default_page_size(),
            first_year: default_first_year(),
            max_retries: default_max_retries(),
            backoff_secs: default_backoff_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjustConfig {
    #[serde(default)]
    pub make_up_day: bool,
    #[serde(default)]
    pub not_holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub special_holidays: Vec<NaiveDate>,
    #[serde(default = "default_make_up_category")]
    pub make_up_category: String,
    #[serde(default = "default_special_category")]
    pub special_category: String,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            make_up_day: false,
            not_holidays: Vec::new(),
            special_holidays: Vec::new(),
            make_up_category: default_make_up_category(),
            special_category: default_special_category(),
        }
    }
}

impl AdjustConfig {
    pub fn to_options(&self) -> AdjustOptions {
        AdjustOptions {
            make_up_day: self.make_up_day,
            not_holidays: self.not_holidays.iter().copied().collect::<BTreeSet<_>>(),
            special_holidays: self.special_holidays.iter().copied().collect::<BTreeSet<_>>(),
            make_up_category: self.make_up_category.clone(),
            special_category: self.special_category.clone(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}
fn default_page_size() -> usize {
    150
}
fn default_first_year() -> i32 {
    2013
}
fn default_max_retries() -> u32 {
    3
}
fn default_backoff_secs() -> u64 {
    1
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_make_up_category() -> String {
    MAKE_UP_WORKDAY_CATEGORY.to_string()
}
fn default_special_category() -> String {
    SPECIAL_HOLIDAY_CATEGORY.to_string()
}

impl AppConfig {
    /// Load the config file if given (defaults otherwise), then apply `.env`
    /// and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        dotenvy::dotenv().ok();
        config.apply_env(std::env::var(URL_ENV).ok());

        config.validate()?;
        Ok(config)
    }

    /// Apply the `HOLIDAY_API_URL` value, if any. Blank values are ignored.
    fn apply_env(&mut self, url: Option<String>) {
        if let Some(url) = url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            self.source.url = url.to_string();
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::usage(format!("Failed to read config '{}': {e}", path.display())))?;
        Self::from_toml_str(&text)
            .map_err(|e| AppError::usage(format!("Invalid config '{}': {e}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.source.page_size == 0 {
            return Err(AppError::usage("[source].page_size must be > 0."));
        }
        if self.source.url.trim().is_empty() {
            return Err(AppError::usage("[source].url must not be empty."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.source.page_size, 150);
        assert_eq!(config.source.first_year, 2013);
        assert_eq!(config.source.max_retries, 3);
        assert!(!config.adjust.make_up_day);
        assert_eq!(config.adjust.make_up_category, MAKE_UP_WORKDAY_CATEGORY);
    }

    #[test]
    fn adjust_section_parses_dates() {
        let config = AppConfig::from_toml_str(
            r#"
            [adjust]
            make_up_day = true
            not_holidays = ["2024-02-08", "2024-02-08"]
            special_holidays = ["2024-05-01"]
            "#,
        )
        .unwrap();
        let opts = config.adjust.to_options();
        assert!(opts.make_up_day);
        assert_eq!(opts.not_holidays.len(), 1);
        assert!(opts.special_holidays.contains(&NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    }

    #[test]
    fn env_url_overrides_source_url() {
        let mut config = AppConfig::default();
        config.apply_env(Some(" https://example.test/holidays.json ".to_string()));
        assert_eq!(config.source.url, "https://example.test/holidays.json");
    }

    #[test]
    fn blank_env_url_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.source.url, default_url());
    }

    #[test]
    fn absent_env_url_keeps_configured_value() {
        let mut config = AppConfig::from_toml_str("[source]\nurl = \"https://mirror.test/json\"\n").unwrap();
        config.apply_env(None);
        assert_eq!(config.source.url, "https://mirror.test/json");

        let mut config = AppConfig::default();
        config.apply_env(None);
        assert_eq!(config.source.url, default_url());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("[source]\npages = 3\n").is_err());
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let mut config = AppConfig::default();
        config.source.page_size = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/datedim.toml")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datedim.toml");
        std::fs::write(&path, "[source]\npage_size = 50\n").unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.source.page_size, 50);
    }
}
