//! Repository for `chats` and `chat_members`.

use boom_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{Chat, CreateChat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, chat_name, is_group_chat, users_hash, latest_message_id, \
    created_at, updated_at";

/// Provides chat lookup by member set, creation and membership checks.
pub struct ChatRepo;

impl ChatRepo {
    /// Find the chat for a canonical member set.
    pub async fn find_by_users_hash(
        pool: &PgPool,
        users_hash: &str,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE users_hash = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(users_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a chat by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a chat and its member rows in one transaction.
    ///
    /// Fails with `uq_chats_users_hash` if a concurrent request created the
    /// same member set first.
    pub async fn create(pool: &PgPool, input: &CreateChat) -> Result<Chat, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO chats (chat_name, is_group_chat, users_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let chat = sqlx::query_as::<_, Chat>(&query)
            .bind(&input.chat_name)
            .bind(input.is_group_chat)
            .bind(&input.users_hash)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO chat_members (chat_id, user_id)
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(chat.id)
        .bind(&input.member_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(chat)
    }

    /// Member user ids of a chat, ascending.
    pub async fn list_member_ids(pool: &PgPool, chat_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM chat_members WHERE chat_id = $1 ORDER BY user_id",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `user_id` belongs to `chat_id`.
    pub async fn is_member(
        pool: &PgPool,
        chat_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM chat_members WHERE chat_id = $1 AND user_id = $2)",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
