//! # Fee Endpoints
//!
//! Resident dues and the admin's monthly fee generation.

use shared::{Fee, FeeStatus, GenerateFeesRequest, GenerateFeesResult};

use super::client::ApiClient;
use crate::core::error::Result;
use crate::utils::validation::validate_generate_fees;

/// Server-side filters for the fee list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeQuery {
    pub status: Option<FeeStatus>,
    pub year: Option<i32>,
}

impl FeeQuery {
    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        query
    }
}

/// List the caller's fees.
#[tracing::instrument(skip(client))]
pub async fn list_fees(client: &ApiClient, query: FeeQuery) -> Result<Vec<Fee>> {
    let fees: Vec<Fee> = client.get("/fees", &query.to_query()).await?;
    tracing::debug!(count = fees.len(), "Fees fetched");
    Ok(fees)
}

/// Get a single fee.
#[tracing::instrument(skip(client))]
pub async fn get_fee(client: &ApiClient, fee_id: &str) -> Result<Fee> {
    client.get(&format!("/fees/{}", fee_id), &[]).await
}

/// Generate one fee per resident for a month (admin only).
#[tracing::instrument(skip(client, request), fields(month = request.month, year = request.year))]
pub async fn generate_fees(
    client: &ApiClient,
    request: &GenerateFeesRequest,
) -> Result<GenerateFeesResult> {
    validate_generate_fees(request)?;

    let result: GenerateFeesResult = client.post("/admin/fees/generate", Some(request)).await?;
    tracing::info!(
        created = result.created,
        skipped = result.skipped,
        "Fees generated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_query_params() {
        assert!(FeeQuery::default().to_query().is_empty());
        let query = FeeQuery {
            status: Some(FeeStatus::Overdue),
            year: Some(2025),
        };
        assert_eq!(
            query.to_query(),
            vec![("status", "overdue".to_string()), ("year", "2025".to_string())]
        );
    }
}
