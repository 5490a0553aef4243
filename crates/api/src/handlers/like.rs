//! Handlers for a video's like list.

use axum::extract::{Path, State};
use axum::Json;
use boom_core::error::CoreError;
use boom_core::ids::parse_id;
use boom_core::social::parse_like_list;
use boom_db::models::video::VideoWithCreator;
use boom_db::repositories::VideoRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::video::with_creator;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /videos/{video_id}/like`.
///
/// `likes` is kept as raw JSON so a non-array value is reported as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ReplaceLikesRequest {
    #[serde(default)]
    pub likes: serde_json::Value,
}

/// POST /api/v1/videos/{video_id}/like
///
/// Replaces the whole like list with the supplied user ids. Ids are not
/// checked against existing users.
pub async fn replace_likes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(video_id): Path<String>,
    Json(input): Json<ReplaceLikesRequest>,
) -> AppResult<Json<DataResponse<VideoWithCreator>>> {
    let id = parse_id(&video_id, "video")?;
    let likes = parse_like_list(&input.likes)?;

    let video = VideoRepo::set_likes(&state.pool, id, &likes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))?;

    tracing::info!(
        video_id = id,
        user_id = user.user_id,
        like_count = video.likes.len(),
        "Like list replaced",
    );

    let data = with_creator(&state.pool, video).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/videos/{video_id}/like/toggle
///
/// Adds the caller to the like list, or removes them if already present.
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(video_id): Path<String>,
) -> AppResult<Json<DataResponse<VideoWithCreator>>> {
    let id = parse_id(&video_id, "video")?;

    let video = VideoRepo::toggle_like(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))?;

    tracing::info!(
        video_id = id,
        user_id = user.user_id,
        liked = video.likes.contains(&user.user_id),
        "Like toggled",
    );

    let data = with_creator(&state.pool, video).await?;
    Ok(Json(DataResponse { data }))
}
