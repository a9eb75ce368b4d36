use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fee lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Unpaid,
    Pending,
    Paid,
    Overdue,
}

impl FeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStatus::Unpaid => "unpaid",
            FeeStatus::Pending => "pending",
            FeeStatus::Paid => "paid",
            FeeStatus::Overdue => "overdue",
        }
    }

    /// Whether money is still owed on a fee in this status.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, FeeStatus::Unpaid | FeeStatus::Overdue)
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unpaid" => Ok(FeeStatus::Unpaid),
            "pending" => Ok(FeeStatus::Pending),
            "paid" => Ok(FeeStatus::Paid),
            "overdue" => Ok(FeeStatus::Overdue),
            other => Err(format!("unknown fee status: {}", other)),
        }
    }
}

/// A monthly due assigned to a resident.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fee {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub month: u32,
    pub year: i32,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Fee {
    /// Sort key for the billing period.
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

/// Admin request to generate one fee per resident for a month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateFeesRequest {
    pub month: u32,
    pub year: i32,
    pub amount: i64,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome of a generate run. Residents that already have a fee for the
/// period are skipped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateFeesResult {
    pub created: u32,
    pub skipped: u32,
}
