use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about. Unrecognized kinds fall back to `System`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Payment,
    Fee,
    Reminder,
    #[serde(other)]
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kind_fallback() {
        let notification: Notification = serde_json::from_str(
            r#"{"id":"n1","user_id":"u1","title":"Info","message":"Pemeliharaan","type":"maintenance","created_at":"2025-03-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(notification.kind, NotificationKind::System);
        assert!(!notification.is_read);
    }
}
