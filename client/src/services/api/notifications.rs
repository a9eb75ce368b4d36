//! # Notification Endpoints

use shared::Notification;

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client))]
pub async fn list_notifications(client: &ApiClient) -> Result<Vec<Notification>> {
    client.get("/notifications", &[]).await
}

#[tracing::instrument(skip(client))]
pub async fn mark_read(client: &ApiClient, notification_id: &str) -> Result<()> {
    client
        .patch(&format!("/notifications/{}/read", notification_id))
        .await
}

#[tracing::instrument(skip(client))]
pub async fn mark_all_read(client: &ApiClient) -> Result<()> {
    client.patch("/notifications/read-all").await
}

#[tracing::instrument(skip(client))]
pub async fn delete_notification(client: &ApiClient, notification_id: &str) -> Result<()> {
    client
        .delete(&format!("/notifications/{}", notification_id))
        .await
}
