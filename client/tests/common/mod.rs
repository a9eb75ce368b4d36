//! # Test Support
//!
//! Shared fixtures for the integration tests: an in-process axum backend bound
//! to an ephemeral port, and an in-memory [`ApiService`] for view-model tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use ipl_client::core::{AppError, Result};
use ipl_client::services::api::FeeQuery;
use ipl_client::{ApiClient, ApiService, Session};
use parking_lot::Mutex;
use shared::{
    AuthResponse, CreateUserRequest, Fee, FeeStatus, GenerateFeesRequest, GenerateFeesResult,
    Notification, NotificationKind, PaidUser, Payment, PaymentSession, PaymentStatus,
    PaymentSummary, UnpaidUser, UpdateUserRequest, User, UserRole,
};

/// Serve `router` on 127.0.0.1 and return its base URL (with `/api`).
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    format!("http://{}/api", addr)
}

/// Client with a short timeout against `base_url`.
pub fn client(base_url: &str, session: Session) -> ApiClient {
    ApiClient::with_timeout(base_url, Duration::from_secs(2), session).expect("Failed to build client")
}

/// Session already holding `token`, kept in memory only.
pub fn logged_in(token: &str) -> Session {
    let session = Session::in_memory();
    session
        .store(&AuthResponse {
            token: token.to_string(),
            user: resident(),
        })
        .expect("In-memory store cannot fail");
    session
}

pub fn resident() -> User {
    User {
        id: "u-1".to_string(),
        name: "Budi Santoso".to_string(),
        email: "budi@warga.id".to_string(),
        role: UserRole::Resident,
        house_number: Some("A-3".to_string()),
        phone: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 5, 8, 0, 0).unwrap(),
    }
}

pub fn payment(id: &str, status: PaymentStatus) -> Payment {
    Payment {
        id: id.to_string(),
        fee_id: "fee-3".to_string(),
        user_id: "u-1".to_string(),
        user_name: Some("Budi Santoso".to_string()),
        amount: 150_000,
        status,
        payment_method: None,
        order_id: Some(format!("IPL-{}", id)),
        redirect_url: None,
        paid_at: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap(),
    }
}

pub fn fee(id: &str, month: u32, status: FeeStatus) -> Fee {
    Fee {
        id: id.to_string(),
        user_id: "u-1".to_string(),
        amount: 150_000,
        month,
        year: 2025,
        due_date: NaiveDate::from_ymd_opt(2025, month, 10).unwrap(),
        status,
        description: None,
        created_at: Utc.with_ymd_and_hms(2025, month, 1, 0, 0, 0).unwrap(),
    }
}

pub fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        user_id: "u-1".to_string(),
        title: "Iuran Maret".to_string(),
        message: "Iuran bulan Maret sudah tersedia.".to_string(),
        kind: NotificationKind::Fee,
        is_read,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 7, 0, 0).unwrap(),
    }
}

/// One scripted answer to a payment poll.
pub type Step = std::result::Result<PaymentStatus, u16>;

/// In-memory backend for view models.
///
/// Payment polls walk through `payment_steps`, repeating the last one. An
/// `Err(code)` step answers with that HTTP status, `Err(0)` with a network
/// failure. Setting `fail_writes` makes every write fail with a 500.
#[derive(Default)]
pub struct FakeApi {
    pub payments: Mutex<Vec<Payment>>,
    pub payment_steps: Mutex<VecDeque<Step>>,
    pub forced_status: Mutex<Option<PaymentStatus>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub fees: Mutex<Vec<Fee>>,
    pub users: Mutex<Vec<User>>,
    pub fail_writes: Mutex<bool>,
    pub fail_lists: Mutex<bool>,
    pub polls: AtomicUsize,
    pub force_checks: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script_payment(&self, steps: impl IntoIterator<Item = Step>) {
        *self.payment_steps.lock() = steps.into_iter().collect();
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    pub fn set_fail_lists(&self, fail: bool) {
        *self.fail_lists.lock() = fail;
    }

    fn write_result(&self) -> Result<()> {
        if *self.fail_writes.lock() {
            Err(http_error(500))
        } else {
            Ok(())
        }
    }

    fn list_result(&self) -> Result<()> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_lists.lock() {
            Err(AppError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn http_error(status: u16) -> AppError {
    let status = reqwest::StatusCode::from_u16(status).expect("Valid test status");
    AppError::from_status(status)
}

#[async_trait]
impl ApiService for FakeApi {
    async fn login(&self, _email: String, _password: String) -> Result<AuthResponse> {
        Ok(AuthResponse {
            token: "fake-token".to_string(),
            user: resident(),
        })
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }

    async fn me(&self) -> Result<User> {
        Ok(resident())
    }

    async fn list_fees(&self, _query: FeeQuery) -> Result<Vec<Fee>> {
        self.list_result()?;
        Ok(self.fees.lock().clone())
    }

    async fn get_fee(&self, fee_id: &str) -> Result<Fee> {
        self.fees.lock().iter().find(|f| f.id == fee_id).cloned().ok_or_else(|| http_error(404))
    }

    async fn generate_fees(&self, _request: &GenerateFeesRequest) -> Result<GenerateFeesResult> {
        Ok(GenerateFeesResult { created: 0, skipped: 0 })
    }

    async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.list_result()?;
        Ok(self.payments.lock().clone())
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut steps = self.payment_steps.lock();
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().copied()
            }
        };
        match step {
            Some(Ok(status)) => Ok(payment(payment_id, status)),
            Some(Err(0)) => Err(AppError::Network("connection reset".to_string())),
            Some(Err(code)) => Err(http_error(code)),
            None => Err(http_error(404)),
        }
    }

    async fn create_payment(&self, fee_id: &str) -> Result<PaymentSession> {
        Ok(PaymentSession {
            payment_id: format!("pay-{}", fee_id),
            order_id: format!("IPL-{}", fee_id),
            redirect_url: "https://gateway.test/pay".to_string(),
        })
    }

    async fn force_check(&self, payment_id: &str) -> Result<Payment> {
        self.force_checks.fetch_add(1, Ordering::SeqCst);
        let status = (*self.forced_status.lock()).unwrap_or(PaymentStatus::Pending);
        Ok(payment(payment_id, status))
    }

    async fn paid_users(&self, month: u32, year: i32) -> Result<Vec<PaidUser>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(vec![PaidUser {
            user_id: "u-1".to_string(),
            name: "Budi Santoso".to_string(),
            house_number: Some("A-3".to_string()),
            amount: 150_000,
            payment_id: "pay-1".to_string(),
            paid_at: Utc.with_ymd_and_hms(year, month, 4, 9, 0, 0).unwrap(),
        }])
    }

    async fn unpaid_users(&self, month: u32, year: i32) -> Result<Vec<UnpaidUser>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(vec![
            UnpaidUser {
                user_id: "u-3".to_string(),
                name: "Siti".to_string(),
                house_number: Some("A-10".to_string()),
                amount: 150_000,
                fee_id: "fee-10".to_string(),
                due_date: NaiveDate::from_ymd_opt(year, month, 10).unwrap(),
            },
            UnpaidUser {
                user_id: "u-2".to_string(),
                name: "Andi".to_string(),
                house_number: Some("A-2".to_string()),
                amount: 150_000,
                fee_id: "fee-2".to_string(),
                due_date: NaiveDate::from_ymd_opt(year, month, 10).unwrap(),
            },
        ])
    }

    async fn payment_summary(&self, month: u32, year: i32) -> Result<PaymentSummary> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(PaymentSummary {
            month,
            year,
            total_paid: 150_000,
            total_unpaid: 300_000,
            paid_count: 1,
            unpaid_count: 2,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_result()?;
        Ok(self.users.lock().clone())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        Ok(User {
            id: "u-new".to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            role: request.role,
            house_number: request.house_number.clone(),
            phone: request.phone.clone(),
            created_at: Utc::now(),
        })
    }

    async fn update_user(&self, user_id: &str, _request: &UpdateUserRequest) -> Result<User> {
        self.users.lock().iter().find(|u| u.id == user_id).cloned().ok_or_else(|| http_error(404))
    }

    async fn delete_user(&self, _user_id: &str) -> Result<()> {
        self.write_result()
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.list_result()?;
        Ok(self.notifications.lock().clone())
    }

    async fn mark_notification_read(&self, _notification_id: &str) -> Result<()> {
        self.write_result()
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        self.write_result()
    }

    async fn delete_notification(&self, _notification_id: &str) -> Result<()> {
        self.write_result()
    }
}
