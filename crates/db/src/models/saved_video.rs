//! Saved-video join records.

use boom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::video::VideoWithCreator;

/// A row from the `saved_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedVideo {
    pub id: DbId,
    pub user_id: DbId,
    pub video_id: DbId,
    pub created_at: Timestamp,
}

/// A save joined with its video (and the video's creator).
#[derive(Debug, Clone, Serialize)]
pub struct SavedVideoDetail {
    #[serde(flatten)]
    pub saved: SavedVideo,
    pub video: VideoWithCreator,
}

/// DTO for saving a video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSavedVideo {
    pub user_id: DbId,
    pub video_id: DbId,
}
