use crate::{Cursor, Role};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by the message store at insert time.
///
/// Ids increase strictly in insert order (the store is the sole arbiter
/// of assignment), so an id is also a valid polling cursor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted chat message. Immutable once created; delivery and
/// cursor order is id order, the store's insert order. `created_at` is
/// display data and may invert relative to id under concurrent
/// publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub user_id: Uuid,
    /// Display name resolved from the user store at read time.
    pub author_name: String,
    pub group: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Cursor a client holds after seeing this message.
    pub fn cursor(&self) -> Cursor {
        Cursor::from(self.id)
    }
}
