//! # Feedback Center
//!
//! Collects what the user should be told: a bounded queue of toasts and at
//! most one persistent banner. A newer banner replaces the current one.

use std::collections::VecDeque;

use crate::core::error::AppError;

use super::classify::{classify, route, Presentation};
use super::messages::ErrorInfo;

const DEFAULT_MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    /// Per-field validation messages, if any
    pub details: Vec<String>,
}

#[derive(Debug)]
pub struct FeedbackCenter {
    toasts: VecDeque<Toast>,
    banner: Option<ErrorInfo>,
    max_toasts: usize,
}

impl Default for FeedbackCenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOASTS)
    }
}

impl FeedbackCenter {
    pub fn new(max_toasts: usize) -> Self {
        Self {
            toasts: VecDeque::with_capacity(max_toasts),
            banner: None,
            max_toasts: max_toasts.max(1),
        }
    }

    /// Classify an error, queue it where it belongs and return the choice.
    pub fn report(&mut self, err: &AppError) -> Presentation {
        let info = classify(err);
        let presentation = route(&info);

        tracing::debug!(
            category = %info.category,
            severity = ?info.severity,
            status = ?info.status,
            presentation = ?presentation,
            error = %err,
            "Error reported"
        );

        match presentation {
            Presentation::Toast => self.push_toast(Toast {
                level: ToastLevel::Error,
                title: info.title,
                message: info.message,
                details: info.details,
            }),
            Presentation::Banner => self.banner = Some(info),
        }
        presentation
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_toast(Toast {
            level: ToastLevel::Success,
            title: title.into(),
            message: message.into(),
            details: Vec::new(),
        });
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_toast(Toast {
            level: ToastLevel::Info,
            title: title.into(),
            message: message.into(),
            details: Vec::new(),
        });
    }

    fn push_toast(&mut self, toast: Toast) {
        if self.toasts.len() >= self.max_toasts {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
    }

    pub fn banner(&self) -> Option<&ErrorInfo> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) -> Option<ErrorInfo> {
        self.banner.take()
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Remove and return all queued toasts, oldest first.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_report_routes_to_toast_or_banner() {
        let mut center = FeedbackCenter::default();

        assert_eq!(
            center.report(&AppError::from_status(StatusCode::NOT_FOUND)),
            Presentation::Toast
        );
        assert!(center.banner().is_none());

        assert_eq!(
            center.report(&AppError::from_status(StatusCode::BAD_GATEWAY)),
            Presentation::Banner
        );
        assert_eq!(center.banner().and_then(|b| b.status), Some(502));
        assert_eq!(center.toasts().count(), 1);
    }

    #[test]
    fn test_newer_banner_replaces_older() {
        let mut center = FeedbackCenter::default();
        center.report(&AppError::from_status(StatusCode::INTERNAL_SERVER_ERROR));
        center.report(&AppError::Network("refused".into()));
        assert_eq!(center.banner().map(|b| b.status), Some(None));

        assert!(center.dismiss_banner().is_some());
        assert!(center.banner().is_none());
    }

    #[test]
    fn test_toast_queue_is_bounded() {
        let mut center = FeedbackCenter::new(2);
        center.info("1", "satu");
        center.success("2", "dua");
        center.report(&AppError::Validation("tiga".into()));

        let toasts = center.drain_toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[1].message, "tiga");
        assert_eq!(toasts[1].level, ToastLevel::Error);
        assert_eq!(center.toasts().count(), 0);
    }
}
