//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the IPL client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login requests and session payloads
//!   - **[`dto::users`]**: Residents and administrators
//!   - **[`dto::fees`]**: Monthly dues and fee generation
//!   - **[`dto::payments`]**: Gateway payments, paid/unpaid users, summaries
//!   - **[`dto::notifications`]**: Resident notifications
//!   - **[`dto::envelope`]**: Success envelope and error body
//! - **[`utils`]**: Shared formatting helpers
//!   - **[`utils::format_rupiah`]**: Format an amount as `Rp 1.250.000`
//!   - **[`utils::period_label`]**: Format a billing period as `Maret 2025`
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in Rust and JSON
//! - Optional fields are omitted from JSON when `None`
//! - Enums serialize to lowercase strings
//! - Money is an integer amount of rupiah (`i64`)
//! - Timestamps are RFC 3339, calendar dates are `YYYY-MM-DD`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::{ApiResponse, Fee};
//! use shared::utils::format_rupiah;
//!
//! let body = r#"{"data":[],"message":"ok"}"#;
//! let response: ApiResponse<Vec<Fee>> = serde_json::from_str(body).unwrap();
//! assert!(response.data.is_empty());
//! assert_eq!(format_rupiah(150_000), "Rp 150.000");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
