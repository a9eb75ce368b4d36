//! # Backend API Client Module
//!
//! HTTP client for communicating with the IPL backend API.
//! Handles authentication, dues, payments, user management and notifications.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs            - Module exports and documentation
//! ├── client.rs         - ApiClient struct, token injection, error normalization
//! ├── auth.rs           - Login, logout, current user
//! ├── fees.rs           - Resident dues and admin fee generation
//! ├── payments.rs       - Gateway payments, status checks, paid/unpaid reports
//! ├── users.rs          - Admin user management
//! └── notifications.rs  - Resident notifications
//! ```

pub mod auth;
pub mod client;
pub mod fees;
pub mod notifications;
pub mod payments;
pub mod users;

pub use client::ApiClient;
pub use fees::FeeQuery;
