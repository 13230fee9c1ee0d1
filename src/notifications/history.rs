//! Bounded notification history.
//!
//! A fixed-capacity ring ([`heapless::Deque`]) holding the most recent
//! notifications, newest at the front.  Pushing into a full log evicts
//! the oldest entry from the back.

use heapless::Deque;

use super::{Notification, Priority};

/// Maximum number of retained notifications.
pub const LOG_CAPACITY: usize = 10;

/// Newest-first notification history, never longer than [`LOG_CAPACITY`].
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Deque<Notification, LOG_CAPACITY>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head.  Returns the evicted tail entry when the log
    /// was already full.
    pub fn push(&mut self, notification: Notification) -> Option<Notification> {
        let evicted = if self.entries.is_full() {
            self.entries.pop_back()
        } else {
            None
        };
        // Cannot fail: a slot was freed above if the ring was full.
        let _ = self.entries.push_front(notification);
        evicted
    }

    /// Copy of the contents, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    /// Number of entries with priority `priority`.
    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.entries
            .iter()
            .filter(|n| n.priority() == priority)
            .count()
    }

    pub fn newest(&self) -> Option<&Notification> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
