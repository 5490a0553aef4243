//! Video entity model, joined views, and DTOs.

use boom_core::error::CoreError;
use boom_core::types::{DbId, Timestamp};
use boom_core::video::VideoKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `videos` table.
///
/// Short-form rows carry `video_file_url`/`video_file_id`; long-form rows
/// carry `video_url` and `price`. Media URLs are always included in
/// responses, whatever the viewer's purchase state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub video_type: String,
    pub video_url: Option<String>,
    pub video_file_url: Option<String>,
    pub video_file_id: Option<String>,
    pub video_thumbnail_url: Option<String>,
    pub video_thumbnail_id: Option<String>,
    pub creator_id: DbId,
    pub price: f64,
    /// User ids, as last written by a like update.
    pub likes: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Video {
    /// Parse the stored `video_type`.
    ///
    /// The column has a CHECK constraint, so failure means the schema and
    /// this crate disagree.
    pub fn kind(&self) -> Result<VideoKind, CoreError> {
        VideoKind::parse(&self.video_type).map_err(|_| {
            CoreError::Internal(format!(
                "video {} has unknown video_type '{}'",
                self.id, self.video_type
            ))
        })
    }
}

/// A video with its creator expanded.
#[derive(Debug, Clone, Serialize)]
pub struct VideoWithCreator {
    #[serde(flatten)]
    pub video: Video,
    pub creator: Option<UserSummary>,
}

/// A video with its creator and like list expanded (feed view).
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub creator: Option<UserSummary>,
    /// The users behind `likes`. Ids that match no user are omitted.
    pub liked_by: Vec<UserSummary>,
}

/// DTO for inserting a video. Built by the upload handler after validation
/// and media-store uploads; never deserialized from a client directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub description: String,
    pub video_type: String,
    pub video_url: Option<String>,
    pub video_file_url: Option<String>,
    pub video_file_id: Option<String>,
    pub video_thumbnail_url: Option<String>,
    pub video_thumbnail_id: Option<String>,
    pub creator_id: DbId,
    pub price: f64,
}
