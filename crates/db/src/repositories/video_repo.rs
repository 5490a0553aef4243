//! Repository for the `videos` table.

use boom_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, video_type, video_url, video_file_url, \
    video_file_id, video_thumbnail_url, video_thumbnail_id, creator_id, price, likes, \
    created_at, updated_at";

/// Size of the recent-videos feed.
pub const RECENT_LIMIT: i64 = 20;

/// Provides insert, lookup, feed and like-list operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video with an empty like list.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos
                (title, description, video_type, video_url, video_file_url, video_file_id,
                 video_thumbnail_url, video_thumbnail_id, creator_id, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_type)
            .bind(&input.video_url)
            .bind(&input.video_file_url)
            .bind(&input.video_file_id)
            .bind(&input.video_thumbnail_url)
            .bind(&input.video_thumbnail_id)
            .bind(input.creator_id)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find several videos by id, in no particular order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Video>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = ANY($1)");
        sqlx::query_as::<_, Video>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// The newest videos, newest first. `limit` is clamped to [`RECENT_LIMIT`].
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Video>, sqlx::Error> {
        let limit = limit.clamp(1, RECENT_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace the like list wholesale.
    ///
    /// Returns `None` if no video with the given ID exists.
    pub async fn set_likes(
        pool: &PgPool,
        id: DbId,
        likes: &[DbId],
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET likes = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(likes)
            .fetch_optional(pool)
            .await
    }

    /// Add `user_id` to the like list if absent, remove it if present.
    ///
    /// Runs as a single UPDATE so concurrent toggles on the same row do not
    /// lose each other's writes. Returns `None` if the video does not exist.
    pub async fn toggle_like(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET likes = CASE
                 WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                 ELSE array_append(likes, $2)
             END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
