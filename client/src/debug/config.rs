//! Logging configuration from environment variables

use std::path::{Path, PathBuf};

/// Default `EnvFilter` directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "ipl_client=info,warn";

/// File name prefix of the daily-rotated log
pub const LOG_FILE_NAME: &str = "ipl-client.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory holding the rotated log files
    pub log_dir: PathBuf,
    /// Filter directive (e.g., "ipl_client=debug,info")
    pub log_level: String,
    /// Mirror events to stderr in addition to the file
    pub log_to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
        }
    }
}

impl LogConfig {
    /// Load from `RUST_LOG` and `IPL_LOG_STDERR`, logging under `log_dir`.
    pub fn from_env(log_dir: impl AsRef<Path>) -> Self {
        Self::from_lookup(log_dir, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(log_dir: impl AsRef<Path>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_to_stderr: lookup("IPL_LOG_STDERR").is_some_and(|v| v == "1"),
        }
    }

    /// Path of today's log file before rotation suffixing
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}
