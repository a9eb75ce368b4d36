//! # Core Abstractions
//!
//! Foundational types used throughout the IPL client:
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`config`]**: Environment-driven client configuration
//! - **[`session`]**: Bearer token and logged-in user
//! - **[`service`]**: `ApiService` trait for dependency injection
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ipl_client::core::{ApiService, ClientConfig, Session};
//! use ipl_client::services::api::ApiClient;
//!
//! let config = ClientConfig::from_env()?;
//! let session = Session::load(&config.session_file)?;
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config, session)?);
//! # Ok::<(), ipl_client::core::AppError>(())
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod session;

pub use config::ClientConfig;
pub use error::{AppError, Result};
pub use service::ApiService;
pub use session::Session;
