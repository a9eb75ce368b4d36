//! Resident dues: cached fee list with status/year filters and period sort.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use shared::{Fee, FeeStatus};

use super::payments_review::SortOrder;
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::api::FeeQuery;

/// Whether a fee is late on `today`: marked overdue by the backend, or still
/// unpaid after its due date.
pub fn is_overdue(fee: &Fee, today: NaiveDate) -> bool {
    match fee.status {
        FeeStatus::Overdue => true,
        FeeStatus::Unpaid => fee.due_date < today,
        FeeStatus::Pending | FeeStatus::Paid => false,
    }
}

/// Sum of amounts still owed.
pub fn outstanding_total(fees: &[Fee]) -> i64 {
    fees.iter()
        .filter(|fee| fee.status.is_outstanding())
        .map(|fee| fee.amount)
        .sum()
}

/// Earliest outstanding fee due on or after `today`.
pub fn next_due(fees: &[Fee], today: NaiveDate) -> Option<&Fee> {
    fees.iter()
        .filter(|fee| fee.status.is_outstanding() && fee.due_date >= today)
        .min_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)))
}

pub fn sort_by_period(fees: &mut [Fee], order: SortOrder) {
    fees.sort_by(|a, b| {
        let by_period = match order {
            SortOrder::Asc => a.period().cmp(&b.period()),
            SortOrder::Desc => b.period().cmp(&a.period()),
        };
        by_period.then_with(|| a.id.cmp(&b.id))
    });
}

fn matches(fee: &Fee, query: &FeeQuery) -> bool {
    query.status.map_or(true, |status| fee.status == status)
        && query.year.map_or(true, |year| fee.year == year)
}

#[derive(Debug, Default)]
struct FeesState {
    fees: Vec<Fee>,
    query: FeeQuery,
    order: SortOrder,
}

#[derive(Clone)]
pub struct FeesView {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<FeesState>>,
}

impl FeesView {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FeesState::default())),
        }
    }

    /// Fetch the resident's fees. The query is sent to the backend and also
    /// applied locally, so a backend that ignores it still yields a correct
    /// view.
    pub async fn refresh(&self) -> Result<usize> {
        let query = self.state.read().query;
        let fees = self.api.list_fees(query).await?;
        let count = fees.len();
        self.state.write().fees = fees;
        tracing::debug!(count, "Fees refreshed");
        Ok(count)
    }

    pub fn set_query(&self, query: FeeQuery) {
        self.state.write().query = query;
    }

    pub fn set_order(&self, order: SortOrder) {
        self.state.write().order = order;
    }

    /// Filtered fees, newest period first unless the order was changed.
    pub fn visible(&self) -> Vec<Fee> {
        let state = self.state.read();
        let mut fees: Vec<Fee> = state.fees.iter().filter(|fee| matches(fee, &state.query)).cloned().collect();
        sort_by_period(&mut fees, state.order);
        fees
    }

    pub fn outstanding_total(&self) -> i64 {
        outstanding_total(&self.visible())
    }

    pub fn overdue(&self, today: NaiveDate) -> Vec<Fee> {
        self.visible().into_iter().filter(|fee| is_overdue(fee, today)).collect()
    }

    pub fn next_due(&self, today: NaiveDate) -> Option<Fee> {
        next_due(&self.visible(), today).cloned()
    }
}
