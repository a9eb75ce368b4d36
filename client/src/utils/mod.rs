//! # Utility Functions
//!
//! Shared utility functions used across the IPL client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form validation (login, fee generation, user management)
//! - **[`csv`]**: Minimal CSV writer for payment exports
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Rupiah and Indonesian date formatting
//! - [`crate::core`]: Core abstractions and error types

pub mod csv;
pub mod validation;
