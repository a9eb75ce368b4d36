//! # Logging
//!
//! File-based structured logging for the client and CLI.
//!
//! - **File output**: `logs/ipl-client.log.YYYY-MM-DD` (daily rotation)
//! - **Stderr mirror**: enabled with `IPL_LOG_STDERR=1`
//! - **Filtering**: `RUST_LOG`, default `ipl_client=info,warn`
//!
//! ```no_run
//! use ipl_client::debug::{self, LogConfig};
//!
//! let _guard = debug::init(&LogConfig::from_env("logs"));
//! tracing::info!(endpoint = "/fees", "Fetching fees");
//! ```

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
