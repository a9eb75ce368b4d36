//! # Error Classification and Routing
//!
//! Turns an [`AppError`] into an [`ErrorInfo`] and decides whether it is shown
//! as a transient toast or a persistent banner.
//!
//! Routing rules:
//!
//! - Any 4xx response is lightweight and goes to a toast (401, 408, 422 and
//!   429 included).
//! - 5xx responses and failures without a response go to the banner.
//! - Local errors route by category, and `Critical` severity always means
//!   banner.

use crate::core::error::AppError;

use super::messages::{error_info_for_status, network_error, ErrorCategory, ErrorInfo, Severity};

/// How an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Toast,
    Banner,
}

/// Statuses where the backend's own message is more useful than ours.
const BACKEND_MESSAGE_STATUSES: [u16; 4] = [400, 403, 409, 422];

/// Classify an error into user-facing information.
pub fn classify(err: &AppError) -> ErrorInfo {
    match err {
        AppError::Network(_) => network_error(),
        AppError::Timeout(_) => error_info_for_status(408),
        AppError::Http {
            status,
            message,
            field_errors,
        } => {
            let mut info = error_info_for_status(*status);
            if BACKEND_MESSAGE_STATUSES.contains(status) && !message.trim().is_empty() {
                info = info.with_message(message.clone());
            }
            if !field_errors.is_empty() {
                let details = field_errors
                    .values()
                    .filter_map(|messages| messages.first().cloned())
                    .collect();
                info = info.with_details(details);
            }
            info
        }
        AppError::Decode(_) => ErrorInfo {
            status: None,
            category: ErrorCategory::Server,
            severity: Severity::High,
            title: "Respons Tidak Dikenali".to_string(),
            message: "Server mengirim respons yang tidak dapat dibaca.".to_string(),
            details: Vec::new(),
            can_retry: true,
            contact_support: true,
        },
        AppError::Validation(message) => ErrorInfo {
            status: None,
            category: ErrorCategory::Validation,
            severity: Severity::Low,
            title: "Data Tidak Valid".to_string(),
            message: message.clone(),
            details: Vec::new(),
            can_retry: false,
            contact_support: false,
        },
        AppError::Session(message) => ErrorInfo {
            status: None,
            category: ErrorCategory::Auth,
            severity: Severity::Medium,
            title: "Belum Masuk".to_string(),
            message: message.clone(),
            details: Vec::new(),
            can_retry: false,
            contact_support: false,
        },
        AppError::Io(message) => ErrorInfo {
            status: None,
            category: ErrorCategory::Client,
            severity: Severity::Medium,
            title: "Gagal Mengakses Berkas".to_string(),
            message: message.clone(),
            details: Vec::new(),
            can_retry: true,
            contact_support: false,
        },
        AppError::Config(message) => ErrorInfo {
            status: None,
            category: ErrorCategory::Client,
            severity: Severity::Critical,
            title: "Konfigurasi Tidak Valid".to_string(),
            message: message.clone(),
            details: Vec::new(),
            can_retry: false,
            contact_support: true,
        },
    }
}

/// Decide where classified information is shown.
pub fn route(info: &ErrorInfo) -> Presentation {
    if info.severity == Severity::Critical {
        return Presentation::Banner;
    }

    if let Some(status) = info.status {
        return presentation_for_status(status);
    }

    match info.category {
        ErrorCategory::Server | ErrorCategory::Network => Presentation::Banner,
        ErrorCategory::Client | ErrorCategory::Auth | ErrorCategory::Validation => Presentation::Toast,
    }
}

/// Presentation by status alone. Status 0 means "no response".
pub fn presentation_for_status(status: u16) -> Presentation {
    match status {
        400..=499 => Presentation::Toast,
        0 | 500..=599 => Presentation::Banner,
        _ => Presentation::Toast,
    }
}

pub fn should_show_as_toast(status: u16) -> bool {
    presentation_for_status(status) == Presentation::Toast
}

pub fn should_show_as_banner(status: u16) -> bool {
    presentation_for_status(status) == Presentation::Banner
}
