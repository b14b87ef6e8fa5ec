use crate::Result as DbErrorResult;
use crate::error::DbError;

use chat_core::{ChatMessage, Cursor, MessageId, Role};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct MessageRepository {
    pool: SqlitePool,
}

/// Row shape shared by every read path. The author name comes from a
/// join against `users`, so renames show up on the next read.
#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    user_id: String,
    author_name: String,
    group_name: String,
    content: String,
    created_at: i64,
}

impl MessageRow {
    #[track_caller]
    fn into_message(self) -> DbErrorResult<ChatMessage> {
        Ok(ChatMessage {
            id: MessageId::new(self.id),
            user_id: Uuid::parse_str(&self.user_id).map_err(|e| DbError::Initialization {
                message: format!("Invalid UUID in chat_messages.user_id: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
            author_name: self.author_name,
            group: Role::from_str(&self.group_name).map_err(|e| DbError::Initialization {
                message: format!("Invalid role in chat_messages.group_name: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
            content: self.content,
            created_at: DateTime::from_timestamp_millis(self.created_at).ok_or_else(|| {
                DbError::Initialization {
                    message: format!(
                        "Invalid timestamp in chat_messages.created_at: {}",
                        self.created_at
                    ),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?,
        })
    }
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message on behalf of `author_id`.
    ///
    /// The group is denormalized from the author's role at insert time,
    /// and the id and timestamp are assigned here, not by the caller.
    /// Returns the persisted record with the author name resolved.
    pub async fn insert(&self, author_id: Uuid, content: &str) -> DbErrorResult<ChatMessage> {
        let author = author_id.to_string();
        let created_at = Utc::now().timestamp_millis();

        let result = sqlx::query(
            r#"
              INSERT INTO chat_messages (user_id, group_name, content, created_at)
              SELECT id, role, ?, ? FROM users WHERE id = ?
              "#,
        )
        .bind(content)
        .bind(created_at)
        .bind(&author)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                user_id: author,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let id = MessageId::new(result.last_insert_rowid());
        self.find_by_id(id).await?.ok_or_else(|| DbError::Sqlx {
            source: sqlx::Error::RowNotFound,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn find_by_id(&self, id: MessageId) -> DbErrorResult<Option<ChatMessage>> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
              SELECT m.id, m.user_id, u.name AS author_name,
                     m.group_name, m.content, m.created_at
              FROM chat_messages m
              JOIN users u ON u.id = m.user_id
              WHERE m.id = ?
              "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MessageRow::into_message).transpose()
    }

    /// Messages in `group` newer than `cursor`, in id order.
    ///
    /// Ordering is by id alone: ids are assigned in insert order, which
    /// is the order cursors are built on. Wall-clock timestamps can
    /// invert under concurrent publishes and must not drive delivery.
    pub async fn query_since(
        &self,
        group: Role,
        cursor: Cursor,
        limit: i64,
    ) -> DbErrorResult<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
              SELECT m.id, m.user_id, u.name AS author_name,
                     m.group_name, m.content, m.created_at
              FROM chat_messages m
              JOIN users u ON u.id = m.user_id
              WHERE m.group_name = ? AND m.id > ?
              ORDER BY m.id ASC
              LIMIT ?
              "#,
        )
        .bind(group.as_str())
        .bind(cursor.value())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MessageRow::into_message).collect()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
