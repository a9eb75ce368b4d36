//! # IPL Client - Library Root
//!
//! Client for an IPL (neighborhood maintenance dues) backend: residents pay
//! their monthly fees through a payment gateway, admins generate fees and
//! review who has paid. This library crate contains all modules used by the
//! `ipl` binary (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              ipl (CLI, main.rs)                        │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - View models, payment watcher, refreshers │
//! │  feedback   - Error classification, toasts and banners │
//! │  services   - REST client and endpoint functions       │
//! │  core       - Config, errors, session, service trait   │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP (Bearer token, JSON envelope)
//!          ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Backend API    │ ───────▶ │   Payment gateway       │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── app (view models)
//!   │   └── core::ApiService ◀── services::api::ApiClient
//!   │
//!   └── feedback (AppError → toast / banner)
//! ```
//!
//! ## State Management
//!
//! View-model state lives in `Arc<parking_lot::RwLock<_>>`. Locks are taken
//! briefly and never held across an `.await`.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use ipl_client::{ApiClient, ClientConfig, PaymentsReview, Session};
//!
//! # async fn run() -> ipl_client::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let session = Session::load(&config.session_file)?;
//! let client = ApiClient::new(&config, session)?;
//!
//! let review = PaymentsReview::new(Arc::new(client));
//! review.refresh().await?;
//! for payment in review.visible() {
//!     println!("{} {}", payment.id, payment.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p ipl-client
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod feedback;
pub mod services;
pub mod utils;

pub use app::{
    FeesView, NotificationCenter, PaymentOutcome, PaymentWatcher, PaymentsReview, PeriodReport,
    UserDirectory, WatchResult,
};
pub use core::{ApiService, AppError, ClientConfig, Result, Session};
pub use feedback::{FeedbackCenter, Presentation};
pub use services::api::ApiClient;
