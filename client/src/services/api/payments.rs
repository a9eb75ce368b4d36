//! # Payment Endpoints
//!
//! Payment creation through the gateway, status checks and the admin's
//! paid/unpaid reports.

use shared::{CreatePaymentRequest, PaidUser, Payment, PaymentSession, PaymentSummary, UnpaidUser};

use super::client::ApiClient;
use crate::core::error::Result;

fn period_query(month: u32, year: i32) -> [(&'static str, String); 2] {
    [("month", month.to_string()), ("year", year.to_string())]
}

/// List payments. Admins receive every payment, residents only their own.
#[tracing::instrument(skip(client))]
pub async fn list_payments(client: &ApiClient) -> Result<Vec<Payment>> {
    let payments: Vec<Payment> = client.get("/payments", &[]).await?;
    tracing::debug!(count = payments.len(), "Payments fetched");
    Ok(payments)
}

/// Get a payment, including its latest known gateway status.
#[tracing::instrument(skip(client))]
pub async fn get_payment(client: &ApiClient, payment_id: &str) -> Result<Payment> {
    client.get(&format!("/payments/{}", payment_id), &[]).await
}

/// Start a gateway payment for a fee.
#[tracing::instrument(skip(client), fields(fee_id = %fee_id))]
pub async fn create_payment(client: &ApiClient, fee_id: &str) -> Result<PaymentSession> {
    let request = CreatePaymentRequest {
        fee_id: fee_id.to_string(),
    };
    let session: PaymentSession = client.post("/payments", Some(&request)).await?;
    tracing::info!(
        payment_id = %session.payment_id,
        order_id = %session.order_id,
        "Payment session created"
    );
    Ok(session)
}

/// Ask the backend to re-query the gateway for a payment right now.
#[tracing::instrument(skip(client), fields(payment_id = %payment_id))]
pub async fn force_check(client: &ApiClient, payment_id: &str) -> Result<Payment> {
    let payment: Payment = client
        .post::<(), Payment>(&format!("/payments/{}/check", payment_id), None)
        .await?;
    tracing::info!(status = %payment.status, "Forced status check completed");
    Ok(payment)
}

/// Residents who paid for a period (admin only).
#[tracing::instrument(skip(client))]
pub async fn paid_users(client: &ApiClient, month: u32, year: i32) -> Result<Vec<PaidUser>> {
    client.get("/admin/payments/paid", &period_query(month, year)).await
}

/// Residents with an outstanding fee for a period (admin only).
#[tracing::instrument(skip(client))]
pub async fn unpaid_users(client: &ApiClient, month: u32, year: i32) -> Result<Vec<UnpaidUser>> {
    client.get("/admin/payments/unpaid", &period_query(month, year)).await
}

/// Collection totals for a period (admin only).
#[tracing::instrument(skip(client))]
pub async fn payment_summary(client: &ApiClient, month: u32, year: i32) -> Result<PaymentSummary> {
    client.get("/admin/payments/summary", &period_query(month, year)).await
}
