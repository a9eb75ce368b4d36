//! # Payment Status Reconciliation
//!
//! Maps gateway statuses onto the few outcomes the client acts on, and
//! follows a payment until the gateway settles it.
//!
//! ```text
//! settlement | capture | success ──▶ Success   ──▶ success page
//! pending                         ──▶ Pending   ──▶ pending page (keep polling)
//! deny | failed                   ──▶ Failed    ──▶ failed page
//! expire                          ──▶ Expired   ──▶ failed page
//! cancel                          ──▶ Cancelled ──▶ failed page
//! refund                          ──▶ Refunded  ──▶ failed page
//! anything else                   ──▶ Unknown   ──▶ pending page (keep polling)
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use shared::{Payment, PaymentCallback, PaymentStatus};
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

use super::refresh::MIN_PERIOD;

/// What a gateway status means for the resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentOutcome {
    Success,
    Pending,
    Failed,
    Expired,
    Cancelled,
    Refunded,
    Unknown,
}

impl From<PaymentStatus> for PaymentOutcome {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Settlement | PaymentStatus::Capture | PaymentStatus::Success => {
                PaymentOutcome::Success
            }
            PaymentStatus::Pending => PaymentOutcome::Pending,
            PaymentStatus::Deny | PaymentStatus::Failed => PaymentOutcome::Failed,
            PaymentStatus::Expire => PaymentOutcome::Expired,
            PaymentStatus::Cancel => PaymentOutcome::Cancelled,
            PaymentStatus::Refund => PaymentOutcome::Refunded,
            PaymentStatus::Unknown => PaymentOutcome::Unknown,
        }
    }
}

impl PaymentOutcome {
    pub const ALL: [PaymentOutcome; 7] = [
        PaymentOutcome::Success,
        PaymentOutcome::Pending,
        PaymentOutcome::Failed,
        PaymentOutcome::Expired,
        PaymentOutcome::Cancelled,
        PaymentOutcome::Refunded,
        PaymentOutcome::Unknown,
    ];

    pub fn of(payment: &Payment) -> Self {
        payment.status.into()
    }

    /// Whether the gateway will not change this payment any more.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentOutcome::Pending | PaymentOutcome::Unknown)
    }

    pub fn destination(&self) -> Destination {
        match self {
            PaymentOutcome::Success => Destination::Success,
            PaymentOutcome::Pending | PaymentOutcome::Unknown => Destination::Pending,
            PaymentOutcome::Failed
            | PaymentOutcome::Expired
            | PaymentOutcome::Cancelled
            | PaymentOutcome::Refunded => Destination::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "success",
            PaymentOutcome::Pending => "pending",
            PaymentOutcome::Failed => "failed",
            PaymentOutcome::Expired => "expired",
            PaymentOutcome::Cancelled => "cancelled",
            PaymentOutcome::Refunded => "refunded",
            PaymentOutcome::Unknown => "unknown",
        }
    }

    /// Indonesian label for display.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "Berhasil",
            PaymentOutcome::Pending => "Menunggu Pembayaran",
            PaymentOutcome::Failed => "Gagal",
            PaymentOutcome::Expired => "Kedaluwarsa",
            PaymentOutcome::Cancelled => "Dibatalkan",
            PaymentOutcome::Refunded => "Dikembalikan",
            PaymentOutcome::Unknown => "Status Tidak Dikenal",
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentOutcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PaymentOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown payment outcome: {}", s))
    }
}

/// Page the payment flow lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Success,
    Pending,
    Failed,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Success => "/payment/success",
            Destination::Pending => "/payment/pending",
            Destination::Failed => "/payment/failed",
        }
    }
}

/// Result of following a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchResult {
    /// The gateway reached a terminal status.
    Settled(Payment),
    /// The attempt budget ran out while the payment was still open.
    StillPending(Payment),
}

impl WatchResult {
    pub fn payment(&self) -> &Payment {
        match self {
            WatchResult::Settled(payment) | WatchResult::StillPending(payment) => payment,
        }
    }

    pub fn outcome(&self) -> PaymentOutcome {
        PaymentOutcome::of(self.payment())
    }
}

/// Where a gateway redirect leads once reconciled with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResolution {
    pub outcome: PaymentOutcome,
    pub payment: Option<Payment>,
    pub fee_id: Option<String>,
}

impl CallbackResolution {
    pub fn destination(&self) -> Destination {
        self.outcome.destination()
    }
}

/// Parse gateway redirect parameters from a query string or a full URL.
///
/// Empty parameters are treated as absent. Parameter values may carry
/// unencoded URLs of their own.
pub fn parse_callback(input: &str) -> Result<PaymentCallback> {
    let input = input.trim();
    let lowered = input.to_ascii_lowercase();
    let url = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("http://callback.invalid/?{}", input.trim_start_matches('?')))
    }
    .map_err(|e| AppError::Validation(format!("Alamat callback tidak valid: {}", e)))?;

    let mut callback = PaymentCallback::default();
    for (key, value) in url.query_pairs() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = match key.as_ref() {
            "payment_id" => &mut callback.payment_id,
            "fee_id" => &mut callback.fee_id,
            "order_id" => &mut callback.order_id,
            "transaction_status" | "status" => &mut callback.transaction_status,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }
    Ok(callback)
}

/// Follows payments through the gateway lifecycle.
#[derive(Clone)]
pub struct PaymentWatcher {
    api: Arc<dyn ApiService>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl PaymentWatcher {
    /// A zero `poll_interval` is raised to the smallest timer period.
    pub fn new(api: Arc<dyn ApiService>, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            api,
            poll_interval: poll_interval.max(MIN_PERIOD),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(api: Arc<dyn ApiService>, config: &ClientConfig) -> Self {
        Self::new(api, config.payment_poll_interval, config.payment_poll_attempts)
    }

    /// Latest status known to the backend.
    pub async fn check(&self, payment_id: &str) -> Result<Payment> {
        self.api.get_payment(payment_id).await
    }

    /// Make the backend ask the gateway right now.
    pub async fn force_check(&self, payment_id: &str) -> Result<Payment> {
        self.api.force_check(payment_id).await
    }

    /// Poll until the payment settles or the attempt budget is spent.
    pub async fn watch(&self, payment_id: &str) -> Result<WatchResult> {
        self.watch_with(payment_id, |_| {}).await
    }

    /// Like [`watch`](Self::watch), calling `on_update` with every status
    /// received.
    ///
    /// Transient errors are retried on the next tick; any other error stops
    /// the watch. When the budget runs out with the payment still open, one
    /// forced gateway check is made before giving up.
    #[tracing::instrument(skip(self, on_update), fields(payment_id = %payment_id))]
    pub async fn watch_with<F>(&self, payment_id: &str, mut on_update: F) -> Result<WatchResult>
    where
        F: FnMut(&Payment) + Send,
    {
        let mut timer = interval(self.poll_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_payment: Option<Payment> = None;
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.max_attempts {
            timer.tick().await;

            match self.api.get_payment(payment_id).await {
                Ok(payment) => {
                    let outcome = PaymentOutcome::of(&payment);
                    tracing::debug!(attempt, status = %payment.status, outcome = %outcome, "Payment polled");
                    on_update(&payment);

                    if outcome.is_terminal() {
                        tracing::info!(attempt, outcome = %outcome, "Payment settled");
                        return Ok(WatchResult::Settled(payment));
                    }
                    last_payment = Some(payment);
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(attempt, error = %e, "Payment poll failed, retrying on next tick");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let Some(pending) = last_payment else {
            return Err(last_error.unwrap_or_else(|| {
                AppError::Timeout(format!("No status received for payment {}", payment_id))
            }));
        };

        match self.api.force_check(payment_id).await {
            Ok(payment) => {
                on_update(&payment);
                if PaymentOutcome::of(&payment).is_terminal() {
                    tracing::info!(status = %payment.status, "Payment settled on forced check");
                    Ok(WatchResult::Settled(payment))
                } else {
                    Ok(WatchResult::StillPending(payment))
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Forced check failed, reporting last known status");
                Ok(WatchResult::StillPending(pending))
            }
        }
    }

    /// Reconcile a gateway redirect with the backend.
    ///
    /// The backend record wins over the redirect's own `transaction_status`,
    /// which is only used when no payment id came back.
    pub async fn resolve_callback(&self, callback: &PaymentCallback) -> Result<CallbackResolution> {
        if let Some(payment_id) = callback.payment_id.as_deref() {
            let payment = self.check(payment_id).await?;
            return Ok(CallbackResolution {
                outcome: PaymentOutcome::of(&payment),
                fee_id: callback.fee_id.clone().or_else(|| Some(payment.fee_id.clone())),
                payment: Some(payment),
            });
        }

        if let Some(status) = callback.transaction_status.as_deref() {
            let status: PaymentStatus = status.parse().unwrap_or(PaymentStatus::Unknown);
            return Ok(CallbackResolution {
                outcome: status.into(),
                payment: None,
                fee_id: callback.fee_id.clone(),
            });
        }

        Err(AppError::Validation(
            "Parameter pembayaran tidak lengkap (payment_id atau transaction_status)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PaymentStatus::Settlement, PaymentOutcome::Success),
            (PaymentStatus::Capture, PaymentOutcome::Success),
            (PaymentStatus::Success, PaymentOutcome::Success),
            (PaymentStatus::Pending, PaymentOutcome::Pending),
            (PaymentStatus::Deny, PaymentOutcome::Failed),
            (PaymentStatus::Failed, PaymentOutcome::Failed),
            (PaymentStatus::Expire, PaymentOutcome::Expired),
            (PaymentStatus::Cancel, PaymentOutcome::Cancelled),
            (PaymentStatus::Refund, PaymentOutcome::Refunded),
            (PaymentStatus::Unknown, PaymentOutcome::Unknown),
        ];
        for (status, outcome) in cases {
            assert_eq!(PaymentOutcome::from(status), outcome, "{}", status);
        }
    }

    #[test]
    fn test_terminal_and_destination() {
        for outcome in PaymentOutcome::ALL {
            let lands_on_pending = outcome.destination() == Destination::Pending;
            assert_eq!(outcome.is_terminal(), !lands_on_pending, "{}", outcome);
        }
        assert_eq!(PaymentOutcome::Expired.destination().path(), "/payment/failed");
        assert_eq!(PaymentOutcome::Success.destination().path(), "/payment/success");
    }

    #[test]
    fn test_outcome_from_str() {
        assert_eq!("Expired".parse::<PaymentOutcome>().unwrap(), PaymentOutcome::Expired);
        assert!("settlement".parse::<PaymentOutcome>().is_err());
    }

    #[test]
    fn test_parse_callback_query() {
        let callback =
            parse_callback("?payment_id=p-1&fee_id=f-9&order_id=IPL-2025-03-7&transaction_status=settlement")
                .unwrap();
        assert_eq!(callback.payment_id.as_deref(), Some("p-1"));
        assert_eq!(callback.fee_id.as_deref(), Some("f-9"));
        assert_eq!(callback.order_id.as_deref(), Some("IPL-2025-03-7"));
        assert_eq!(callback.transaction_status.as_deref(), Some("settlement"));
    }

    #[test]
    fn test_parse_callback_full_url_and_empty_values() {
        let callback =
            parse_callback("https://ipl.example.id/payment/finish?payment_id=&status=pending&x=1").unwrap();
        assert!(callback.payment_id.is_none());
        assert_eq!(callback.transaction_status.as_deref(), Some("pending"));
    }

    #[test]
    fn test_parse_callback_query_with_unencoded_return_url() {
        let callback = parse_callback(
            "payment_id=p-1&transaction_status=settlement&return_url=https://ipl.example.id/done",
        )
        .unwrap();
        assert_eq!(callback.payment_id.as_deref(), Some("p-1"));
        assert_eq!(callback.transaction_status.as_deref(), Some("settlement"));
    }

    #[test]
    fn test_parse_callback_rejects_malformed_url() {
        let err = parse_callback("https://[broken/finish?payment_id=p-1").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_parse_callback_decodes_percent_escapes() {
        let callback = parse_callback("order_id=IPL%2F2025%2F03").unwrap();
        assert_eq!(callback.order_id.as_deref(), Some("IPL/2025/03"));
    }
}
