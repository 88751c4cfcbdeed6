//! Notification endpoints.

use serde::Deserialize;

use taskdeck_api::endpoints;
use taskdeck_api::notification::{Notification, NotificationId};

use super::{ApiClient, ApiError};

/// Response to `GET /notifications/count`.
#[derive(Debug, Deserialize)]
struct UnreadCount {
    count: u64,
}

/// Lists every notification for the authenticated user.
pub async fn list(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get(endpoints::NOTIFICATIONS).await
}

/// Lists unread notifications.
pub async fn unread(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get(endpoints::NOTIFICATIONS_UNREAD).await
}

/// Returns the unread notification count.
pub async fn unread_count(client: &ApiClient) -> Result<u64, ApiError> {
    let body: UnreadCount = client.get(endpoints::NOTIFICATIONS_COUNT).await?;
    Ok(body.count)
}

/// Marks one notification read, returning the updated record.
pub async fn mark_read(client: &ApiClient, id: &NotificationId) -> Result<Notification, ApiError> {
    client.put_unit(&endpoints::notification_read(id)).await
}

/// Marks every notification read.
pub async fn mark_all_read(client: &ApiClient) -> Result<(), ApiError> {
    client.put_empty(endpoints::NOTIFICATIONS_READ_ALL).await
}
