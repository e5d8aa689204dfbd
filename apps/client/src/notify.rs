//! Notification sink: transient user-facing messages with auto-expiry.
//! The engine pushes; the view layer drains after each operation. Messages
//! that sat undrained past their TTL are dropped, mirroring a toast that
//! timed out before anyone looked.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

const DEFAULT_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at > ttl
    }
}

#[derive(Debug)]
pub struct Notifier {
    pending: VecDeque<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.pending.push_back(Notification {
            level,
            message: message.into(),
            created_at: Utc::now(),
        });
    }

    /// Hands pending, unexpired notifications to the caller exactly once.
    pub fn drain(&mut self) -> Vec<Notification> {
        let now = Utc::now();
        let ttl = self.ttl;
        self.pending
            .drain(..)
            .filter(|n| !n.expired(now, ttl))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_each_notification_once() {
        let mut notifier = Notifier::new();
        notifier.push(Level::Success, "saved");
        notifier.push(Level::Error, "failed");

        let first = notifier.drain();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].level, Level::Success);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_expired_notifications_are_dropped_on_drain() {
        let mut notifier = Notifier::new();
        notifier.push(Level::Warning, "stale");
        // Backdate past the TTL.
        notifier.pending[0].created_at = Utc::now() - Duration::seconds(10);
        notifier.push(Level::Success, "fresh");

        let drained = notifier.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].message, "fresh");
    }

    #[test]
    fn test_levels_are_preserved_in_order() {
        let mut notifier = Notifier::new();
        notifier.push(Level::Warning, "added to mistake log");
        notifier.push(Level::Success, "saved");

        let drained = notifier.drain();
        assert_eq!(drained[0].level, Level::Warning);
        assert_eq!(drained[1].level, Level::Success);
    }
}
