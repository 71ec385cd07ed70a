//! # Memobird HTTP Client
//!
//! Builds signed form requests against the Memobird open API.
//!
//! ## Example
//!
//! ```no_run
//! use memobird_bot::memobird::{App, AppConfig, BirdApp};
//!
//! # async fn example() -> Result<(), memobird_bot::error::MemobirdError> {
//! let app = App::new(AppConfig::new("my-access-key"))?;
//! let result = app.print_text("Hello!", "0123456789abcdef").await?;
//! println!("sent: {}, printed: {}", result.success, result.printed);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use super::BirdApp;
use super::encoding;
use super::result::{BindResult, PrintPaperReply, PrintResult, SetUserBindReply};
use crate::error::MemobirdError;

/// Default API prefix
pub const API_PREFIX: &str = "https://open.memobird.cn/home";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Vendor civil time (Asia/Shanghai, no DST).
const VENDOR_UTC_OFFSET_SECS: i32 = 8 * 3600;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FN_PRINT_PAPER: &str = "printpaper";
const FN_SET_USER_BIND: &str = "setuserbind";

/// Configuration of an [`App`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Access key issued to the application (`ak`).
    pub access_key: String,
    /// Applied to every request, connect included.
    pub timeout: Duration,
    /// Alternative API prefix; [`API_PREFIX`] when `None`.
    pub api_prefix: Option<String>,
    /// Offset of the timezone request timestamps are written in.
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            timeout: DEFAULT_TIMEOUT,
            api_prefix: None,
            utc_offset: vendor_utc_offset(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn api_prefix(&self) -> &str {
        self.api_prefix.as_deref().unwrap_or(API_PREFIX)
    }
}

/// UTC+08:00
pub fn vendor_utc_offset() -> FixedOffset {
    FixedOffset::east_opt(VENDOR_UTC_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Format `now` as the vendor expects: local civil time, second precision.
pub fn format_timestamp(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string()
}

/// A Memobird application.
#[derive(Debug, Clone)]
pub struct App {
    config: AppConfig,
    http: reqwest::Client,
}

impl App {
    /// Create an App from its configuration.
    pub fn new(config: AppConfig) -> Result<Self, MemobirdError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("memobird-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn api_url(&self, func: &str) -> String {
        format!("{}/{}", self.config.api_prefix().trim_end_matches('/'), func)
    }

    /// Append the signature fields (`ak`, `timestamp`) to an operation's fields.
    pub fn signed_form(
        &self,
        mut fields: Vec<(&'static str, String)>,
        now: DateTime<Utc>,
    ) -> Vec<(&'static str, String)> {
        fields.push(("ak", self.config.access_key.clone()));
        fields.push(("timestamp", format_timestamp(now, self.config.utc_offset)));
        fields
    }

    async fn call<R: DeserializeOwned>(
        &self,
        func: &str,
        fields: Vec<(&'static str, String)>,
    ) -> Result<R, MemobirdError> {
        let url = self.api_url(func);
        let form = self.signed_form(fields, Utc::now());
        debug!(%url, fields = ?form.iter().filter(|(k, _)| *k != "ak").collect::<Vec<_>>(), "POST");

        let response = self.http.post(&url).form(&form).send().await?;
        let body = response.bytes().await?;
        debug!(body = %String::from_utf8_lossy(&body), "API response");

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl BirdApp for App {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn print_text(&self, text: &str, device_id: &str) -> Result<PrintResult, MemobirdError> {
        let content = encoding::text_content(text)?;
        let reply: PrintPaperReply = self
            .call(
                FN_PRINT_PAPER,
                vec![
                    ("printcontent", content),
                    ("memobirdID", device_id.to_string()),
                ],
            )
            .await?;
        Ok(reply.into())
    }

    #[instrument(skip(self))]
    async fn bind_device(&self, device_id: &str) -> Result<BindResult, MemobirdError> {
        // `useridentifying` is documented but rejected by the API when set.
        let reply: SetUserBindReply = self
            .call(FN_SET_USER_BIND, vec![("memobirdID", device_id.to_string())])
            .await?;
        Ok(reply.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_is_vendor_local_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(now, vendor_utc_offset()), "2024-01-01 08:00:00");

        let late = Utc.with_ymd_and_hms(2023, 12, 31, 20, 30, 5).unwrap();
        assert_eq!(format_timestamp(late, vendor_utc_offset()), "2024-01-01 04:30:05");
    }

    #[test]
    fn test_signed_form_appends_key_and_timestamp() {
        let app = App::new(AppConfig::new("secret")).unwrap();
        let now = Utc.with_ymd_and_hms(2020, 5, 17, 3, 4, 5).unwrap();
        let form = app.signed_form(vec![("memobirdID", "dev".to_string())], now);
        assert_eq!(
            form,
            vec![
                ("memobirdID", "dev".to_string()),
                ("ak", "secret".to_string()),
                ("timestamp", "2020-05-17 11:04:05".to_string()),
            ]
        );
    }

    #[test]
    fn test_api_url() {
        let app = App::new(AppConfig::new("k")).unwrap();
        assert_eq!(app.api_url("printpaper"), "https://open.memobird.cn/home/printpaper");

        let app = App::new(AppConfig::new("k").with_api_prefix("http://127.0.0.1:1/home/")).unwrap();
        assert_eq!(app.api_url("setuserbind"), "http://127.0.0.1:1/home/setuserbind");
    }
}
