//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! View models in [`crate::app`] depend on `Arc<dyn ApiService>` instead of
//! the concrete [`ApiClient`], so their tests can run against an in-memory
//! backend.

use async_trait::async_trait;
use shared::{
    AuthResponse, CreateUserRequest, Fee, GenerateFeesRequest, GenerateFeesResult, Notification,
    PaidUser, Payment, PaymentSession, PaymentSummary, UnpaidUser, UpdateUserRequest, User,
};

use crate::core::error::Result;
use crate::services::api::{self, ApiClient, FeeQuery};

/// Trait for API service operations
///
/// This trait allows for dependency injection and mocking in tests.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Login with email and password
    async fn login(&self, email: String, password: String) -> Result<AuthResponse>;

    /// Logout and clear the local session
    async fn logout(&self) -> Result<()>;

    /// User behind the current token
    async fn me(&self) -> Result<User>;

    /// Fees of the logged-in resident
    async fn list_fees(&self, query: FeeQuery) -> Result<Vec<Fee>>;

    async fn get_fee(&self, fee_id: &str) -> Result<Fee>;

    /// Generate a month of fees for every resident
    async fn generate_fees(&self, request: &GenerateFeesRequest) -> Result<GenerateFeesResult>;

    async fn list_payments(&self) -> Result<Vec<Payment>>;

    /// Payment with its latest known gateway status
    async fn get_payment(&self, payment_id: &str) -> Result<Payment>;

    /// Start a gateway payment for a fee
    async fn create_payment(&self, fee_id: &str) -> Result<PaymentSession>;

    /// Make the backend re-query the gateway
    async fn force_check(&self, payment_id: &str) -> Result<Payment>;

    async fn paid_users(&self, month: u32, year: i32) -> Result<Vec<PaidUser>>;

    async fn unpaid_users(&self, month: u32, year: i32) -> Result<Vec<UnpaidUser>>;

    async fn payment_summary(&self, month: u32, year: i32) -> Result<PaymentSummary>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User>;

    async fn update_user(&self, user_id: &str, request: &UpdateUserRequest) -> Result<User>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;

    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    async fn mark_notification_read(&self, notification_id: &str) -> Result<()>;

    async fn mark_all_notifications_read(&self) -> Result<()>;

    async fn delete_notification(&self, notification_id: &str) -> Result<()>;
}

#[async_trait]
impl ApiService for ApiClient {
    async fn login(&self, email: String, password: String) -> Result<AuthResponse> {
        api::auth::login(self, email, password).await
    }

    async fn logout(&self) -> Result<()> {
        api::auth::logout(self).await
    }

    async fn me(&self) -> Result<User> {
        api::auth::me(self).await
    }

    async fn list_fees(&self, query: FeeQuery) -> Result<Vec<Fee>> {
        api::fees::list_fees(self, query).await
    }

    async fn get_fee(&self, fee_id: &str) -> Result<Fee> {
        api::fees::get_fee(self, fee_id).await
    }

    async fn generate_fees(&self, request: &GenerateFeesRequest) -> Result<GenerateFeesResult> {
        api::fees::generate_fees(self, request).await
    }

    async fn list_payments(&self) -> Result<Vec<Payment>> {
        api::payments::list_payments(self).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        api::payments::get_payment(self, payment_id).await
    }

    async fn create_payment(&self, fee_id: &str) -> Result<PaymentSession> {
        api::payments::create_payment(self, fee_id).await
    }

    async fn force_check(&self, payment_id: &str) -> Result<Payment> {
        api::payments::force_check(self, payment_id).await
    }

    async fn paid_users(&self, month: u32, year: i32) -> Result<Vec<PaidUser>> {
        api::payments::paid_users(self, month, year).await
    }

    async fn unpaid_users(&self, month: u32, year: i32) -> Result<Vec<UnpaidUser>> {
        api::payments::unpaid_users(self, month, year).await
    }

    async fn payment_summary(&self, month: u32, year: i32) -> Result<PaymentSummary> {
        api::payments::payment_summary(self, month, year).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        api::users::list_users(self).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        api::users::create_user(self, request).await
    }

    async fn update_user(&self, user_id: &str, request: &UpdateUserRequest) -> Result<User> {
        api::users::update_user(self, user_id, request).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        api::users::delete_user(self, user_id).await
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        api::notifications::list_notifications(self).await
    }

    async fn mark_notification_read(&self, notification_id: &str) -> Result<()> {
        api::notifications::mark_read(self, notification_id).await
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        api::notifications::mark_all_read(self).await
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<()> {
        api::notifications::delete_notification(self, notification_id).await
    }
}
