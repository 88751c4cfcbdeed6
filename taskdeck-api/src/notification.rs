//! User notifications.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Unique identifier for a notification. Opaque string assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates a `NotificationId` from a raw string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A notification as returned by the server.
///
/// `is_read` only ever transitions `false` to `true` on this client;
/// nothing un-reads a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Short headline.
    pub title: String,
    /// Notification body.
    pub message: String,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// Task to navigate to, when the notification concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// Creation timestamp.
    pub created_at: String,
}
