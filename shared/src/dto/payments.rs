use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gateway transaction status, passed through by the backend as-is.
///
/// Statuses this client does not know deserialize to [`PaymentStatus::Unknown`]
/// rather than failing the whole response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Settlement,
    Capture,
    Success,
    Deny,
    Cancel,
    Expire,
    Failed,
    Refund,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Settlement => "settlement",
            PaymentStatus::Capture => "capture",
            PaymentStatus::Success => "success",
            PaymentStatus::Deny => "deny",
            PaymentStatus::Cancel => "cancel",
            PaymentStatus::Expire => "expire",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refund => "refund",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = std::convert::Infallible;

    /// Never fails; unrecognized strings become [`PaymentStatus::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pending" => PaymentStatus::Pending,
            "settlement" => PaymentStatus::Settlement,
            "capture" => PaymentStatus::Capture,
            "success" => PaymentStatus::Success,
            "deny" => PaymentStatus::Deny,
            "cancel" => PaymentStatus::Cancel,
            "expire" => PaymentStatus::Expire,
            "failed" => PaymentStatus::Failed,
            "refund" => PaymentStatus::Refund,
            _ => PaymentStatus::Unknown,
        })
    }
}

/// A transaction record against a fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub fee_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub amount: i64,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request to start a gateway payment for a fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePaymentRequest {
    pub fee_id: String,
}

/// Gateway session returned when a payment is created. The resident
/// completes the payment at `redirect_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSession {
    pub payment_id: String,
    pub order_id: String,
    pub redirect_url: String,
}

/// Query parameters the gateway appends when it redirects back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCallback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<String>,
}

/// Resident who has paid for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaidUser {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    pub amount: i64,
    pub payment_id: String,
    pub paid_at: DateTime<Utc>,
}

/// Resident with an outstanding fee for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnpaidUser {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    pub amount: i64,
    pub fee_id: String,
    pub due_date: NaiveDate,
}

/// Collection totals for one period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSummary {
    pub month: u32,
    pub year: i32,
    pub total_paid: i64,
    pub total_unpaid: i64,
    pub paid_count: u32,
    pub unpaid_count: u32,
}

impl PaymentSummary {
    /// Share of residents that have paid, in percent (0 when nobody is billed).
    pub fn collection_rate(&self) -> f64 {
        let billed = self.paid_count + self.unpaid_count;
        if billed == 0 {
            return 0.0;
        }
        f64::from(self.paid_count) * 100.0 / f64::from(billed)
    }
}
