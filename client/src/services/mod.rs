//! # Services Module
//!
//! External service integrations for the IPL client.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  app::* view models / CLI                 │
//! │          │ ApiService trait                │
//! │          ▼                                 │
//! │  ApiClient (services::api)                 │
//! └──────────┼────────────────────────────────┘
//!            │ HTTP/JSON, Bearer token
//!            ▼
//! ┌───────────────────────────────────────────┐
//! │  IPL backend                               │
//! │  /auth/*  /fees  /payments  /admin/*       │
//! │  /notifications                            │
//! └───────────────────────────────────────────┘
//! ```
//!
//! View models never talk to `ApiClient` directly; they take an
//! `Arc<dyn ApiService>` so tests can swap in an in-memory backend.

pub mod api;
