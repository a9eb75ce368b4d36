//! # View Models
//!
//! Front-end state for every screen of the IPL client, independent of how it
//! is rendered. Each view model holds an `Arc<dyn ApiService>` and its own
//! `Arc<RwLock<_>>` state, so it can be cloned into background refresh tasks.
//!
//! ```text
//! ┌──────────────────────┐   refresh()    ┌──────────────────────┐
//! │  PaymentsReview      │ ─────────────▶ │  Arc<dyn ApiService> │
//! │  FeesView            │                └──────────┬───────────┘
//! │  NotificationCenter  │                           │
//! │  UserDirectory       │                           ▼
//! └──────────┬───────────┘                     ApiClient (HTTP)
//!            │ spawn_*()
//!            ▼
//!     RefreshHandle (interval task, stopped on drop)
//! ```
//!
//! [`payment_status`] reconciles gateway redirects and polls open payments
//! until they settle.

pub mod fees;
pub mod notifications;
pub mod payment_status;
pub mod payments_review;
pub mod refresh;
pub mod users;

pub use fees::FeesView;
pub use notifications::NotificationCenter;
pub use payment_status::{
    parse_callback, CallbackResolution, Destination, PaymentOutcome, PaymentWatcher, WatchResult,
};
pub use payments_review::{PaymentFilter, PaymentsReview, SortKey, SortOrder};
pub use refresh::{spawn_refresh, RefreshHandle};
pub use users::{PeriodReport, UserDirectory, UserFilter, UserSort};
