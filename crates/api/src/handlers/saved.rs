//! Handlers for saved videos.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boom_core::error::CoreError;
use boom_core::ids::{parse_id, require_id, IdInput};
use boom_db::models::saved_video::{CreateSavedVideo, SavedVideoDetail};
use boom_db::repositories::{SavedVideoRepo, VideoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::video::{find_video, with_creator, with_creators};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Message returned when the video is already in the caller's saved list.
pub const ALREADY_SAVED: &str = "Video already saved";

/// Request body for `POST /videos/save`.
#[derive(Debug, Deserialize)]
pub struct SaveVideoRequest {
    /// Must be the caller when present.
    pub user: Option<IdInput>,
    pub video: Option<IdInput>,
}

/// POST /api/v1/videos/save
///
/// Duplicate saves are detected by a lookup before the insert; two racing
/// requests can both succeed.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SaveVideoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedVideoDetail>>)> {
    // An owner that does not parse cannot name the caller either.
    if let Some(owner) = &input.user {
        if owner.resolve("user").ok() != Some(user.user_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot save for another user".into(),
            )));
        }
    }
    let video_id = require_id(input.video.as_ref(), "video")?;
    let video = find_video(&state.pool, video_id).await?;

    if SavedVideoRepo::find_by_user_and_video(&state.pool, user.user_id, video_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::invalid(ALREADY_SAVED)));
    }

    let saved = SavedVideoRepo::create(
        &state.pool,
        &CreateSavedVideo {
            user_id: user.user_id,
            video_id,
        },
    )
    .await?;

    tracing::info!(saved_id = saved.id, video_id, user_id = user.user_id, "Video saved");

    let video = with_creator(&state.pool, video).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SavedVideoDetail { saved, video },
        }),
    ))
}

/// DELETE /api/v1/videos/save/{id}
pub async fn unsave(
    State(state): State<AppState>,
    user: AuthUser,
    Path(saved_id): Path<String>,
) -> AppResult<Json<DataResponse<SuccessResponse>>> {
    let id = parse_id(&saved_id, "saved video")?;

    let saved = SavedVideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Saved video",
            id,
        }))?;

    if saved.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete another user's saved video".into(),
        )));
    }

    // A concurrent delete may have won since the lookup.
    if !SavedVideoRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Saved video",
            id,
        }));
    }
    tracing::info!(saved_id = id, user_id = user.user_id, "Saved video removed");

    Ok(Json(DataResponse {
        data: SuccessResponse { success: true },
    }))
}

/// GET /api/v1/videos/saved/{user_id}
///
/// A user's saved videos, newest save first, each with its video and the
/// video's creator.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<SavedVideoDetail>>>> {
    let user_id = parse_id(&user_id, "user")?;
    let saves = SavedVideoRepo::list_by_user(&state.pool, user_id).await?;

    let video_ids: Vec<_> = saves.iter().map(|s| s.video_id).collect();
    let videos = VideoRepo::find_by_ids(&state.pool, &video_ids).await?;
    let videos: HashMap<_, _> = with_creators(&state.pool, videos)
        .await?
        .into_iter()
        .map(|v| (v.video.id, v))
        .collect();

    // A video deleted between the two queries drops its save from the page.
    let data = saves
        .into_iter()
        .filter_map(|saved| {
            let video = videos.get(&saved.video_id)?.clone();
            Some(SavedVideoDetail { saved, video })
        })
        .collect();

    Ok(Json(DataResponse { data }))
}
