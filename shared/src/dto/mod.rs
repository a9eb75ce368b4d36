//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the IPL backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login request and authenticated session payload
//! - [`users`] - User records and admin user management requests
//! - [`fees`] - Monthly dues and the fee generation request
//! - [`payments`] - Payments, gateway callback parameters, paid/unpaid users
//! - [`notifications`] - Resident notifications
//! - [`envelope`] - `{ "data": ... }` success envelope and error body
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "email": "warga@example.com", "password": "rahasia123" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! {
//!   "data": {
//!     "token": "eyJhbGciOi...",
//!     "user": { "id": "7", "name": "Budi", "role": "resident", ... }
//!   },
//!   "message": "Login berhasil"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 422 Unprocessable Entity
//!
//! { "message": "Data tidak valid", "errors": { "email": ["Email wajib diisi"] } }
//! ```

pub mod auth;
pub mod envelope;
pub mod fees;
pub mod notifications;
pub mod payments;
pub mod users;

pub use auth::*;
pub use envelope::*;
pub use fees::*;
pub use notifications::*;
pub use payments::*;
pub use users::*;
