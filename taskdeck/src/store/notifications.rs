//! Mirrored notification list.

use taskdeck_api::notification::{Notification, NotificationId};

/// Notifications as last returned by the server.
///
/// Read flags are monotonic here: a mark-read only ever flips `false`
/// to `true`, and nothing in this store un-reads a notification.
#[derive(Debug, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with a fresh server response.
    pub fn set(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
    }

    /// Replaces the notification with the same id, keeping the read flag
    /// monotonic: a replacement cannot un-read a notification.
    pub fn replace(&mut self, notification: Notification) {
        if let Some(existing) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification.id)
        {
            let was_read = existing.is_read;
            *existing = notification;
            existing.is_read |= was_read;
        }
    }

    /// Marks one notification read.
    pub fn mark_read(&mut self, id: &NotificationId) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == *id) {
            notification.is_read = true;
        }
    }

    /// Marks every notification read.
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }

    /// The current list, in server order.
    #[must_use]
    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}
