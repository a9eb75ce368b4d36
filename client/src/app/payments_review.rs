//! # Payments Review
//!
//! Admin (and resident) payment list: a cached copy of `GET /payments`,
//! filtered by outcome, date range and free-text search, sorted by any
//! column, summarized per outcome and exportable as CSV.
//!
//! The cache is replaced wholesale on every refresh. Filters and sort order
//! survive refreshes.

use std::collections::{BTreeMap, BTreeSet};
use std::cmp::Ordering;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use shared::Payment;

use super::payment_status::PaymentOutcome;
use super::refresh::{spawn_refresh, RefreshHandle};
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::utils::csv::write_record;

/// Client-side filter over the payment list. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Outcomes to keep; empty keeps all
    pub outcomes: BTreeSet<PaymentOutcome>,
    /// Inclusive lower bound on the creation date (UTC)
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date (UTC)
    pub to: Option<NaiveDate>,
    /// Case-insensitive match on user name, order id or payment id
    pub search: Option<String>,
    pub fee_id: Option<String>,
}

impl PaymentFilter {
    pub fn with_outcome(mut self, outcome: PaymentOutcome) -> Self {
        self.outcomes.insert(outcome);
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Whether `payment` passes every set criterion.
    ///
    /// A range with `from` after `to` matches nothing.
    pub fn matches(&self, payment: &Payment) -> bool {
        if !self.outcomes.is_empty() && !self.outcomes.contains(&PaymentOutcome::of(payment)) {
            return false;
        }

        let created = payment.created_at.date_naive();
        if self.from.is_some_and(|from| created < from) || self.to.is_some_and(|to| created > to) {
            return false;
        }

        if let Some(fee_id) = &self.fee_id {
            if &payment.fee_id != fee_id {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                [Some(payment.id.as_str()), payment.user_name.as_deref(), payment.order_id.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Amount,
    Status,
    UserName,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "created_at" | "date" => Ok(SortKey::CreatedAt),
            "amount" => Ok(SortKey::Amount),
            "status" => Ok(SortKey::Status),
            "user_name" | "name" | "user" => Ok(SortKey::UserName),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter then sort. Ties are broken by payment id so the order is stable
/// across refreshes.
pub fn apply_view(payments: &[Payment], filter: &PaymentFilter, key: SortKey, order: SortOrder) -> Vec<Payment> {
    let mut visible: Vec<Payment> = payments.iter().filter(|p| filter.matches(p)).cloned().collect();
    sort_payments(&mut visible, key, order);
    visible
}

pub fn sort_payments(payments: &mut [Payment], key: SortKey, order: SortOrder) {
    payments.sort_by(|a, b| {
        let primary = match key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Status => PaymentOutcome::of(a).cmp(&PaymentOutcome::of(b)),
            SortKey::UserName => compare_names(a.user_name.as_deref(), b.user_name.as_deref()),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// Case-insensitive, with missing names last.
fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Split payments into one bucket per outcome. Every payment lands in
/// exactly one bucket.
pub fn partition_by_outcome(payments: &[Payment]) -> BTreeMap<PaymentOutcome, Vec<Payment>> {
    let mut buckets: BTreeMap<PaymentOutcome, Vec<Payment>> = BTreeMap::new();
    for payment in payments {
        buckets
            .entry(PaymentOutcome::of(payment))
            .or_default()
            .push(payment.clone());
    }
    buckets
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTotal {
    pub count: usize,
    pub amount: i64,
}

/// Count and amount per outcome.
pub fn totals(payments: &[Payment]) -> BTreeMap<PaymentOutcome, OutcomeTotal> {
    let mut totals: BTreeMap<PaymentOutcome, OutcomeTotal> = BTreeMap::new();
    for payment in payments {
        let total = totals.entry(PaymentOutcome::of(payment)).or_default();
        total.count += 1;
        total.amount += payment.amount;
    }
    totals
}

/// Write payments as CSV with a header row. Returns the number of data rows.
pub fn export_csv<W: Write>(payments: &[Payment], writer: &mut W) -> Result<usize> {
    write_record(
        writer,
        [
            "payment_id",
            "order_id",
            "fee_id",
            "user_id",
            "user_name",
            "amount",
            "status",
            "outcome",
            "payment_method",
            "created_at",
            "paid_at",
        ],
    )?;

    for payment in payments {
        let outcome = PaymentOutcome::of(payment);
        write_record(
            writer,
            [
                payment.id.clone(),
                payment.order_id.clone().unwrap_or_default(),
                payment.fee_id.clone(),
                payment.user_id.clone(),
                payment.user_name.clone().unwrap_or_default(),
                payment.amount.to_string(),
                payment.status.to_string(),
                outcome.to_string(),
                payment.payment_method.clone().unwrap_or_default(),
                payment.created_at.to_rfc3339(),
                payment.paid_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ],
        )?;
    }
    Ok(payments.len())
}

#[derive(Debug, Default)]
struct ReviewState {
    payments: Vec<Payment>,
    filter: PaymentFilter,
    sort_key: SortKey,
    sort_order: SortOrder,
    last_refreshed: Option<DateTime<Utc>>,
}

/// Shared payment list with filter/sort state.
///
/// Clones share the same state, so a clone can be handed to the refresh task.
#[derive(Clone)]
pub struct PaymentsReview {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<ReviewState>>,
}

impl PaymentsReview {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ReviewState::default())),
        }
    }

    /// Replace the cached list with a fresh fetch.
    pub async fn refresh(&self) -> Result<usize> {
        let payments = self.api.list_payments().await?;
        let count = payments.len();

        let mut state = self.state.write();
        state.payments = payments;
        state.last_refreshed = Some(Utc::now());
        tracing::debug!(count, "Payments review refreshed");
        Ok(count)
    }

    /// Refresh every `period` until the handle is dropped.
    pub fn spawn_auto_refresh(&self, period: Duration) -> RefreshHandle {
        let review = self.clone();
        spawn_refresh("payments_review", period, move || {
            let review = review.clone();
            async move { review.refresh().await.map(|_| ()) }
        })
    }

    pub fn set_filter(&self, filter: PaymentFilter) {
        self.state.write().filter = filter;
    }

    pub fn filter(&self) -> PaymentFilter {
        self.state.read().filter.clone()
    }

    pub fn set_sort(&self, key: SortKey, order: SortOrder) {
        let mut state = self.state.write();
        state.sort_key = key;
        state.sort_order = order;
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_refreshed
    }

    /// Every cached payment, unfiltered.
    pub fn all(&self) -> Vec<Payment> {
        self.state.read().payments.clone()
    }

    /// Filtered and sorted view.
    pub fn visible(&self) -> Vec<Payment> {
        let state = self.state.read();
        apply_view(&state.payments, &state.filter, state.sort_key, state.sort_order)
    }

    /// Totals over the filtered view.
    pub fn totals(&self) -> BTreeMap<PaymentOutcome, OutcomeTotal> {
        totals(&self.visible())
    }

    /// Export the filtered view.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> Result<usize> {
        export_csv(&self.visible(), writer)
    }
}
