//! Notifications — immutable event records, the threshold notifier that
//! creates them, and the bounded log that keeps the most recent ones.
//!
//! ```text
//!  FillStep ──▶ ThresholdNotifier ──▶ Notification ──▶ NotificationLog (≤ 10)
//!  reset    ──▶        │                                 newest first
//! ```

mod history;
mod notifier;

pub use self::history::{LOG_CAPACITY, NotificationLog};
pub use self::notifier::{RESET_MESSAGE, ThresholdNotifier, demo_history};

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::ports::Timestamp;
use crate::error::{Error, Result};

/// Maximum message length in bytes.
pub const MESSAGE_CAPACITY: usize = 96;

/// Fixed-capacity message text.
pub type MessageText = heapless::String<MESSAGE_CAPACITY>;

/// Per-engine unique notification id, allocated from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Full,
    Warning,
    Info,
    Success,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::Success => "Success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One noteworthy event.  Fields are private; a notification cannot be
/// changed after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    message: MessageText,
    timestamp: Timestamp,
    kind: NotificationKind,
    priority: Priority,
}

impl Notification {
    /// Build a notification.  Fails when `message` does not fit in
    /// [`MESSAGE_CAPACITY`] bytes.
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        priority: Priority,
        message: &str,
        timestamp: Timestamp,
    ) -> Result<Self> {
        let mut text = MessageText::new();
        text.push_str(message)
            .map_err(|()| Error::Notification("message exceeds capacity"))?;
        Ok(Self {
            id,
            message: text,
            timestamp,
            kind,
            priority,
        })
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}
