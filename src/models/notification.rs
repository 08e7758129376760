use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category attached to notifications by the backend. Unknown categories
/// degrade to `Info` instead of failing deserialization, so new backend
/// categories never break existing clients.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn parse(label: &str) -> Self {
        match label {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            "warning" => NotificationKind::Warning,
            // default arm: anything else is informational
            _ => NotificationKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Info
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(NotificationKind::parse(&label))
    }
}

/// One entry of the in-app notification feed (`GET /notifications`).
#[derive(Deserialize, Debug, Clone)]
pub struct NotificationRecord {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response body of `GET /notifications/unread/count`.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct UnreadCount {
    pub unread_count: u64,
}
