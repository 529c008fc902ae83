// src/services/notification_queue.rs
//
// Notification Queue - transient user-facing messages
//
// RULES:
// - Entries are kept in insertion order; no coalescing, no dedup
// - Each entry is visible for DISPLAY_DURATION, then closing for
//   CLOSING_DURATION, then removed
// - Expiry is driven by tick(now) against a min-heap of deadlines;
//   the queue never spawns timers of its own

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tokio::time::Instant;

use crate::domain::{
    Notification, NotificationId, NotificationKind, NotificationPhase, CLOSING_DURATION,
    DISPLAY_DURATION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Expiry {
    Close,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Deadline {
    at: Instant,
    seq: u64,
    id: NotificationId,
    expiry: Expiry,
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    deadlines: BinaryHeap<Reverse<Deadline>>,
    seq: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; `None` kind means info
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: impl Into<Option<NotificationKind>>,
    ) -> NotificationId {
        let notification = Notification::new(message, kind.into().unwrap_or_default());
        let id = notification.id;
        let now = Instant::now();

        log::debug!("Notification [{:?}] {}", notification.kind, notification.message);

        self.schedule(now + DISPLAY_DURATION, id, Expiry::Close);
        self.schedule(now + DISPLAY_DURATION + CLOSING_DURATION, id, Expiry::Remove);
        self.entries.push(notification);
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.enqueue(message, NotificationKind::Info)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.enqueue(message, NotificationKind::Success)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.enqueue(message, NotificationKind::Warning)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.enqueue(message, NotificationKind::Error)
    }

    /// Apply every transition due at or before `now`.
    /// Returns true when the visible queue changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while self.deadlines.peek().is_some_and(|Reverse(d)| d.at <= now) {
            if let Some(Reverse(due)) = self.deadlines.pop() {
                changed |= self.expire(due);
            }
        }

        changed
    }

    /// Earliest pending transition, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.peek().map(|Reverse(d)| d.at)
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn schedule(&mut self, at: Instant, id: NotificationId, expiry: Expiry) {
        self.seq += 1;
        self.deadlines.push(Reverse(Deadline {
            at,
            seq: self.seq,
            id,
            expiry,
        }));
    }

    fn expire(&mut self, due: Deadline) -> bool {
        match due.expiry {
            Expiry::Close => match self.entries.iter_mut().find(|n| n.id == due.id) {
                Some(entry) => {
                    entry.phase = NotificationPhase::Closing;
                    true
                }
                None => false,
            },
            Expiry::Remove => {
                let before = self.entries.len();
                self.entries.retain(|n| n.id != due.id);
                before != self.entries.len()
            }
        }
    }
}
