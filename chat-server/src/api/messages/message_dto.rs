use chat_core::{ChatMessage, MessageId, Role};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: MessageId,
    pub user_id: Uuid,
    pub author_name: String,
    pub group: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            user_id: message.user_id,
            author_name: message.author_name,
            group: message.group,
            content: message.content,
            created_at: message.created_at,
        }
    }
}
