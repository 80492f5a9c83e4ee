//! Host notifications
//!
//! The editor reports save outcomes through a [`NotificationSink`]. Sinks are
//! fire-and-forget: nothing is returned to the editor.

use std::sync::Mutex;
use std::sync::PoisonError;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The operation completed.
    Success,
    /// The operation failed.
    Error,
}

impl Severity {
    /// Returns the variant name hosts use for styling.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// A toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title to display (single line).
    pub title: String,
    /// Message body.
    pub message: String,
    /// Severity (affects styling).
    pub severity: Severity,
}

impl Notification {
    /// Create a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// Create an error notification.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Receives notifications raised by the editor.
pub trait NotificationSink: Send + Sync {
    /// Shows a notification.
    fn notify(&self, notification: Notification);
}

/// A sink that writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => log::info!("{}: {}", notification.title, notification.message),
            Severity::Error => log::error!("{}: {}", notification.title, notification.message),
        }
    }
}

/// A sink that queues notifications for the host to drain and display.
///
/// # Example
///
/// ```
/// use sorter_lib::notify::{Notification, NotificationSink, ToastQueue};
///
/// let queue = ToastQueue::new();
/// queue.notify(Notification::success("Success", "Sort order saved."));
/// assert_eq!(queue.drain().len(), 1);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Notification>>,
}

impl ToastQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the number of pending notifications.
    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&self, notification: Notification) {
        log::debug!("ToastQueue: queued {} notification", notification.severity.as_str());
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
