//! Playback authorization endpoint.

use axum::extract::{Path, State};
use axum::Json;
use boom_core::ids::parse_id;
use boom_core::playback::{can_watch, requires_purchase};
use boom_core::types::DbId;
use boom_db::repositories::PurchaseRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::video::find_video;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// What a client should offer for a video: play it, or ask for a purchase.
#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    pub video_id: DbId,
    pub requires_purchase: bool,
    pub purchased: bool,
    pub can_watch: bool,
}

/// GET /api/v1/videos/{video_id}/playback
///
/// Anonymous callers are answered as if they hold no purchase.
pub async fn playback(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(video_id): Path<String>,
) -> AppResult<Json<DataResponse<PlaybackResponse>>> {
    let id = parse_id(&video_id, "video")?;
    let video = find_video(&state.pool, id).await?;
    let kind = video.kind()?;

    let gated = requires_purchase(kind, video.price);
    let purchased = match viewer.user_id() {
        Some(user_id) if gated => PurchaseRepo::find_completed(&state.pool, user_id, id)
            .await?
            .is_some(),
        _ => false,
    };

    Ok(Json(DataResponse {
        data: PlaybackResponse {
            video_id: id,
            requires_purchase: gated,
            purchased,
            can_watch: can_watch(kind, video.price, purchased),
        },
    }))
}
