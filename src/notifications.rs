//! Notifications
//!
//! User-facing messages raised when a cart operation is rejected. Delivery is
//! fire and forget: a notifier never reports back to the cart.

use std::fmt::{Display, Formatter, Result as FmtResult};

use mockall::automock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// An operation was rejected.
    Error,
}

/// The fixed set of messages a cart can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMessage {
    /// The requested quantity is above available stock.
    StockExceeded,

    /// Adding a product failed for any other reason.
    AddFailed,

    /// The product to remove is not in the cart.
    RemoveFailed,

    /// Updating a quantity failed for any other reason.
    UpdateFailed,
}

impl NotificationMessage {
    /// The literal text shown to the user.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StockExceeded => "requested quantity exceeds stock",
            Self::AddFailed => "failed to add product",
            Self::RemoveFailed => "failed to remove product",
            Self::UpdateFailed => "failed to update quantity",
        }
    }
}

impl Display for NotificationMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,

    /// Message
    pub message: NotificationMessage,
}

impl Notification {
    /// Create an error notification.
    pub const fn error(message: NotificationMessage) -> Self {
        Self {
            level: NotificationLevel::Error,
            message,
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.message, f)
    }
}

/// Outbound channel for user-visible notifications.
#[automock]
pub trait Notifier: Send + Sync {
    /// Hand a notification to the user interface.
    fn notify(&self, notification: Notification);
}

/// Notifier that only records notifications in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => error!(notification = %notification.message, "cart notification"),
        }
    }
}

/// Notifier that forwards notifications to a receiver owned by the UI.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end the UI drains.
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // A dropped receiver means nobody is listening any more.
        _ = self.sender.send(notification);
    }
}
