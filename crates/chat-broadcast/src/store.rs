use crate::Result as BroadcastErrorResult;

use chat_core::{ChatMessage, Cursor, Role};
use chat_db::MessageRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Boundary to the durable message store.
///
/// The store is the sole arbiter of write ordering and identifier
/// assignment; `insert` returns the persisted record with the author's
/// display name resolved.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, author_id: Uuid, content: &str) -> BroadcastErrorResult<ChatMessage>;

    /// Messages in `group` newer than `cursor`, oldest first, capped at
    /// `limit` rows.
    async fn query_since(
        &self,
        group: Role,
        cursor: Cursor,
        limit: i64,
    ) -> BroadcastErrorResult<Vec<ChatMessage>>;
}

/// Production store backed by the SQLite message repository.
pub struct SqliteMessageStore {
    messages: MessageRepository,
}

impl SqliteMessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            messages: MessageRepository::new(pool),
        }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn insert(&self, author_id: Uuid, content: &str) -> BroadcastErrorResult<ChatMessage> {
        Ok(self.messages.insert(author_id, content).await?)
    }

    async fn query_since(
        &self,
        group: Role,
        cursor: Cursor,
        limit: i64,
    ) -> BroadcastErrorResult<Vec<ChatMessage>> {
        Ok(self.messages.query_since(group, cursor, limit).await?)
    }
}
