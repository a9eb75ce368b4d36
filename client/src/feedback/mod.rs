//! # User Feedback for Errors
//!
//! Classification of errors into categories with Indonesian user-facing
//! messages, and routing of each error to a toast or a persistent banner.
//!
//! - **[`messages`]**: status code → [`ErrorInfo`] lookup table
//! - **[`classify`]**: [`AppError`](crate::core::AppError) → [`ErrorInfo`], toast-vs-banner routing
//! - **[`center`]**: toast queue and banner slot
//!
//! ```rust
//! use ipl_client::core::AppError;
//! use ipl_client::feedback::{classify, route, Presentation};
//!
//! let info = classify(&AppError::Network("connection refused".to_string()));
//! assert_eq!(route(&info), Presentation::Banner);
//! assert!(info.can_retry);
//! ```

pub mod center;
pub mod classify;
pub mod messages;

pub use center::{FeedbackCenter, Toast, ToastLevel};
pub use classify::{classify, presentation_for_status, route, should_show_as_banner, should_show_as_toast, Presentation};
pub use messages::{error_info_for_status, network_error, ErrorCategory, ErrorInfo, Severity};
