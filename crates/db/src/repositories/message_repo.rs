//! Repository for the `messages` table.

use boom_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, chat_id, sender_id, content, created_at, updated_at";

/// Restricts to chats joined by `$1`, optionally to chat `$2`.
const MEMBER_FILTER: &str = "chat_id IN (SELECT chat_id FROM chat_members WHERE user_id = $1) \
    AND ($2::BIGINT IS NULL OR chat_id = $2)";

/// Default page size for message listings.
pub const DEFAULT_LIMIT: i64 = 25;

/// Upper bound on a single message page.
pub const MAX_LIMIT: i64 = 100;

/// Provides message insert and paged listing.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message and point the chat's `latest_message_id` at it.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO messages (chat_id, sender_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(input.chat_id)
            .bind(input.sender_id)
            .bind(&input.content)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE chats SET latest_message_id = $2 WHERE id = $1")
            .bind(input.chat_id)
            .bind(message.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// Find a message by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of messages visible to `member_id`, oldest first.
    ///
    /// Only chats the member belongs to are searched; `chat_id` narrows the
    /// page to one of them. `limit` defaults to [`DEFAULT_LIMIT`] and is
    /// clamped to `1..=MAX_LIMIT`; negative offsets are treated as zero.
    pub async fn list_for_member(
        pool: &PgPool,
        member_id: DbId,
        chat_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE {MEMBER_FILTER}
             ORDER BY created_at ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(member_id)
            .bind(chat_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of messages matched by [`MessageRepo::list_for_member`].
    pub async fn count_for_member(
        pool: &PgPool,
        member_id: DbId,
        chat_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM messages WHERE {MEMBER_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(member_id)
            .bind(chat_id)
            .fetch_one(pool)
            .await
    }
}
