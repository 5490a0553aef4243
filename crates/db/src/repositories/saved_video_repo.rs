//! Repository for the `saved_videos` table.

use boom_core::types::DbId;
use sqlx::PgPool;

use crate::models::saved_video::{CreateSavedVideo, SavedVideo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, video_id, created_at";

/// Provides save, unsave and listing of a user's saved videos.
pub struct SavedVideoRepo;

impl SavedVideoRepo {
    /// Insert a save record. Does not check for an existing save.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSavedVideo,
    ) -> Result<SavedVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO saved_videos (user_id, video_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedVideo>(&query)
            .bind(input.user_id)
            .bind(input.video_id)
            .fetch_one(pool)
            .await
    }

    /// Find a save record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SavedVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM saved_videos WHERE id = $1");
        sqlx::query_as::<_, SavedVideo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an existing save of `video_id` by `user_id`.
    pub async fn find_by_user_and_video(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
    ) -> Result<Option<SavedVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_videos
             WHERE user_id = $1 AND video_id = $2
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, SavedVideo>(&query)
            .bind(user_id)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a save record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All saves of a user, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SavedVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_videos
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SavedVideo>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
