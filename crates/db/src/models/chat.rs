//! Chat and message models and DTOs.

use boom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `chats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: DbId,
    pub chat_name: String,
    pub is_group_chat: bool,
    pub users_hash: String,
    pub latest_message_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A chat with its members expanded.
#[derive(Debug, Clone, Serialize)]
pub struct ChatDetail {
    #[serde(flatten)]
    pub chat: Chat,
    pub users: Vec<UserSummary>,
    pub latest_message: Option<Message>,
}

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A message with its sender expanded.
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetail {
    #[serde(flatten)]
    pub message: Message,
    pub sender: Option<UserSummary>,
}

/// DTO for creating a chat. `member_ids` must be canonical (sorted, distinct).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChat {
    pub chat_name: String,
    pub is_group_chat: bool,
    pub users_hash: String,
    pub member_ids: Vec<DbId>,
}

/// DTO for posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub content: String,
}
