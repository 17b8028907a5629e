use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Global application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the homework status API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    /// Homework status endpoint
    pub practicum_endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Delay between poll cycles in seconds (default: 600)
    pub retry_interval_secs: u64,

    /// How far back the first request looks, in seconds (default: one week)
    pub lookback_secs: u64,

    /// Upper bound for a single HTTP request in seconds (default: 30)
    pub request_timeout_secs: u64,

    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables, seeding them from `.env` if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Every missing credential is collected before failing so a single
    /// startup error names all of them. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let practicum_token = get("PRACTICUM_TOKEN");
        let telegram_token = get("TELEGRAM_TOKEN");
        let telegram_chat_id = get("TELEGRAM_CHAT_ID").or_else(|| get("CHAT_ID"));

        let mut missing = Vec::new();
        if practicum_token.is_none() {
            missing.push("PRACTICUM_TOKEN");
        }
        if telegram_token.is_none() {
            missing.push("TELEGRAM_TOKEN");
        }
        if telegram_chat_id.is_none() {
            missing.push("TELEGRAM_CHAT_ID");
        }

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token, telegram_token, telegram_chat_id)
        else {
            return Err(AppError::MissingCredential(missing));
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be `pretty` or `json`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval_secs: parse_secs(get("RETRY_INTERVAL_SECS"), "RETRY_INTERVAL_SECS", 600)?,
            lookback_secs: parse_secs(get("LOOKBACK_SECS"), "LOOKBACK_SECS", 7 * 24 * 60 * 60)?,
            request_timeout_secs: parse_secs(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                30,
            )?,
            log_format,
        })
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Unix timestamp the first poll starts from: `now` minus the lookback window.
    pub fn initial_since(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        let lookback = i64::try_from(self.lookback_secs).unwrap_or(i64::MAX);
        now.timestamp().saturating_sub(lookback)
    }
}

fn parse_secs(raw: Option<String>, key: &str, default: u64) -> Result<u64, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a valid u64, got `{value}`"))),
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_interval_secs", &self.retry_interval_secs)
            .field("lookback_secs", &self.lookback_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_format", &self.log_format)
            .finish()
    }
}
