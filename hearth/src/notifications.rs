use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::Sequence;

/// An immutable message delivered to a single user.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    body: String,
    order: u64,
    created_at: DateTime<Utc>,
}

impl Notification {
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Position in the owning log, starting at 1.
    pub fn order(&self) -> u64 {
        self.order
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Append-only per-user notification log, viewed most-recent-first.
#[derive(Debug, Default, Clone, Serialize)]
pub struct NotificationLog {
    // oldest first; views iterate in reverse
    entries: Vec<Notification>,
    #[serde(skip)]
    sequence: Sequence,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, body: impl Into<String>) -> &Notification {
        let order = self.sequence.allocate();
        self.entries.push(Notification {
            body: body.into(),
            order,
            created_at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn view(&self) -> impl DoubleEndedIterator<Item = &Notification> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
