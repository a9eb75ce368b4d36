//! Admin views: the user directory and the per-period payment report.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{PaidUser, PaymentSummary, UnpaidUser, User, UserRole};

use super::payments_review::SortOrder;
use crate::core::error::Result;
use crate::core::service::ApiService;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    /// Case-insensitive match on name, email or house number
    pub search: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| user.role != role) {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                [Some(user.name.as_str()), Some(user.email.as_str()), user.house_number.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    #[default]
    Name,
    HouseNumber,
}

pub fn sort_users(users: &mut [User], key: UserSort, order: SortOrder) {
    users.sort_by(|a, b| {
        let primary = match key {
            UserSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            UserSort::HouseNumber => compare_house(a.house_number.as_deref(), b.house_number.as_deref()),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// House numbers like "A-2" and "A-10" compare by their digits, so "A-2"
/// comes first. Users without a house number sort last.
fn compare_house(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => house_key(a).cmp(&house_key(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn house_key(house: &str) -> (String, u64, String) {
    let house = house.trim().to_uppercase();
    let start = house.find(|c: char| c.is_ascii_digit()).unwrap_or(house.len());
    let end = house[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(house.len(), |offset| start + offset);
    let number = house[start..end].parse().unwrap_or(0);
    (house[..start].to_string(), number, house[end..].to_string())
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<User>,
    filter: UserFilter,
    sort: UserSort,
    order: SortOrder,
}

#[derive(Clone)]
pub struct UserDirectory {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<DirectoryState>>,
}

impl UserDirectory {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        let state = DirectoryState {
            order: SortOrder::Asc,
            ..Default::default()
        };
        Self {
            api,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn refresh(&self) -> Result<usize> {
        let users = self.api.list_users().await?;
        let count = users.len();
        self.state.write().users = users;
        Ok(count)
    }

    pub fn set_users(&self, users: Vec<User>) {
        self.state.write().users = users;
    }

    pub fn set_filter(&self, filter: UserFilter) {
        self.state.write().filter = filter;
    }

    pub fn set_sort(&self, sort: UserSort, order: SortOrder) {
        let mut state = self.state.write();
        state.sort = sort;
        state.order = order;
    }

    pub fn visible(&self) -> Vec<User> {
        let state = self.state.read();
        let mut users: Vec<User> = state.users.iter().filter(|u| state.filter.matches(u)).cloned().collect();
        sort_users(&mut users, state.sort, state.order);
        users
    }

    pub fn residents_count(&self) -> usize {
        self.state
            .read()
            .users
            .iter()
            .filter(|u| u.role == UserRole::Resident)
            .count()
    }
}

/// Who paid and who did not for one billing period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub summary: PaymentSummary,
    pub paid: Vec<PaidUser>,
    pub unpaid: Vec<UnpaidUser>,
}

impl PeriodReport {
    /// Fetch the summary and both user lists concurrently. Any failure fails
    /// the whole report.
    #[tracing::instrument(skip(api))]
    pub async fn load(api: &dyn ApiService, month: u32, year: i32) -> Result<Self> {
        let (summary, mut paid, mut unpaid) = futures::try_join!(
            api.payment_summary(month, year),
            api.paid_users(month, year),
            api.unpaid_users(month, year),
        )?;

        paid.sort_by(|a, b| b.paid_at.cmp(&a.paid_at).then_with(|| a.user_id.cmp(&b.user_id)));
        unpaid.sort_by(|a, b| {
            compare_house(a.house_number.as_deref(), b.house_number.as_deref())
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::debug!(paid = paid.len(), unpaid = unpaid.len(), "Period report loaded");
        Ok(Self { summary, paid, unpaid })
    }

    pub fn outstanding_amount(&self) -> i64 {
        self.unpaid.iter().map(|u| u.amount).sum()
    }
}
