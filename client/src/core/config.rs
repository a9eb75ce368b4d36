//! # Client Configuration
//!
//! Configuration loaded from environment variables (and a `.env` file when
//! present). All values are validated before the client is built so a bad
//! setup fails fast instead of on the first request.
//!
//! | Variable | Default |
//! |---|---|
//! | `IPL_API_URL` | `http://127.0.0.1:8000/api` |
//! | `IPL_TIMEOUT_SECS` | `10` |
//! | `IPL_REFRESH_INTERVAL_SECS` | `30` |
//! | `IPL_PAYMENT_POLL_SECS` | `5` |
//! | `IPL_PAYMENT_POLL_ATTEMPTS` | `24` |
//! | `IPL_SESSION_FILE` | `.ipl-session.json` |
//! | `IPL_LOG_DIR` | `logs` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{AppError, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Interval for list auto-refresh (payments review, notifications)
    pub refresh_interval: Duration,

    /// Interval between payment status polls
    pub payment_poll_interval: Duration,

    /// Maximum number of status polls before giving up on a pending payment
    pub payment_poll_attempts: u32,

    /// Where the login token is persisted
    pub session_file: PathBuf,

    /// Directory for rotated log files
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(30),
            payment_poll_interval: Duration::from_secs(5),
            payment_poll_attempts: 24,
            session_file: PathBuf::from(".ipl-session.json"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if it exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("IPL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        Ok(Self {
            api_url,
            timeout: secs(&lookup, "IPL_TIMEOUT_SECS")?.unwrap_or(defaults.timeout),
            refresh_interval: secs(&lookup, "IPL_REFRESH_INTERVAL_SECS")?
                .unwrap_or(defaults.refresh_interval),
            payment_poll_interval: secs(&lookup, "IPL_PAYMENT_POLL_SECS")?
                .unwrap_or(defaults.payment_poll_interval),
            payment_poll_attempts: number(&lookup, "IPL_PAYMENT_POLL_ATTEMPTS")?
                .unwrap_or(defaults.payment_poll_attempts),
            session_file: lookup("IPL_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            log_dir: lookup("IPL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "IPL_API_URL must start with http:// or https:// (got {})",
                self.api_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(AppError::Config("IPL_TIMEOUT_SECS must be greater than 0".to_string()));
        }

        if self.refresh_interval.is_zero() || self.payment_poll_interval.is_zero() {
            return Err(AppError::Config("Refresh and poll intervals must be greater than 0".to_string()));
        }

        if self.payment_poll_attempts == 0 {
            return Err(AppError::Config(
                "IPL_PAYMENT_POLL_ATTEMPTS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Replace the base URL (CLI override), normalizing the trailing slash.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

fn number<F>(lookup: &F, key: &str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|e| AppError::Config(format!("{} must be a valid number: {}", key, e)))
        })
        .transpose()
}

fn secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(number(lookup, key)?.map(|n| Duration::from_secs(u64::from(n))))
}
