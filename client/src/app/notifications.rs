//! # Notification Center
//!
//! Cached notifications with optimistic updates. Read flags and deletions are
//! applied locally before the request is sent and undone if it fails, so the
//! list reacts immediately and never drifts from the backend for long.
//!
//! Rollback only touches the entries the failed action changed; a refresh that
//! landed in between is kept.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use shared::Notification;

use super::refresh::{spawn_refresh, RefreshHandle};
use crate::core::error::Result;
use crate::core::service::ApiService;

/// Polling period when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct NotificationCenter {
    api: Arc<dyn ApiService>,
    items: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn refresh(&self) -> Result<usize> {
        let notifications = self.api.list_notifications().await?;
        let count = notifications.len();
        *self.items.write() = notifications;
        tracing::debug!(count, unread = self.unread_count(), "Notifications refreshed");
        Ok(count)
    }

    /// Poll every `period` until the handle is dropped.
    pub fn spawn_polling(&self, period: Duration) -> RefreshHandle {
        let center = self.clone();
        spawn_refresh("notifications", period, move || {
            let center = center.clone();
            async move { center.refresh().await.map(|_| ()) }
        })
    }

    pub fn list(&self) -> Vec<Notification> {
        self.items.read().clone()
    }

    pub fn unread(&self) -> Vec<Notification> {
        self.items.read().iter().filter(|n| !n.is_read).cloned().collect()
    }

    pub fn unread_count(&self) -> usize {
        self.items.read().iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read. Already-read or unknown ids still hit the
    /// backend but change nothing locally.
    #[tracing::instrument(skip(self))]
    pub async fn mark_read(&self, notification_id: &str) -> Result<()> {
        let flipped = self.set_read(|n| n.id == notification_id, true);

        if let Err(e) = self.api.mark_notification_read(notification_id).await {
            if !flipped.is_empty() {
                self.set_read(|n| flipped.contains(&n.id), false);
                tracing::warn!(error = %e, "Mark read failed, rolled back");
            }
            return Err(e);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<()> {
        let flipped = self.set_read(|_| true, true);

        if let Err(e) = self.api.mark_all_notifications_read().await {
            self.set_read(|n| flipped.contains(&n.id), false);
            tracing::warn!(error = %e, restored = flipped.len(), "Mark all read failed, rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// Remove a notification. On failure it is put back at its old position.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, notification_id: &str) -> Result<()> {
        let removed = {
            let mut items = self.items.write();
            items
                .iter()
                .position(|n| n.id == notification_id)
                .map(|index| (index, items.remove(index)))
        };

        if let Err(e) = self.api.delete_notification(notification_id).await {
            if let Some((index, notification)) = removed {
                let mut items = self.items.write();
                if !items.iter().any(|n| n.id == notification.id) {
                    let index = index.min(items.len());
                    items.insert(index, notification);
                }
                tracing::warn!(error = %e, "Delete failed, rolled back");
            }
            return Err(e);
        }

        if removed.is_none() {
            tracing::debug!("Deleted notification was not cached");
        }
        Ok(())
    }

    /// Set `is_read` on matching entries, returning the ids that changed.
    fn set_read<P>(&self, predicate: P, read: bool) -> HashSet<String>
    where
        P: Fn(&Notification) -> bool,
    {
        let mut changed = HashSet::new();
        for notification in self.items.write().iter_mut() {
            if notification.is_read != read && predicate(notification) {
                notification.is_read = read;
                changed.insert(notification.id.clone());
            }
        }
        changed
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("count", &self.items.read().len())
            .field("unread", &self.unread_count())
            .finish()
    }
}
