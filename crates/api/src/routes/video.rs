//! Route definitions for the `/videos` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{like, playback, purchase, saved, video};
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// Static segments (`recent`, `save`, `purchase`, ...) take priority over
/// `{video_id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(video::create))
        .route("/recent", get(video::list_recent))
        .route("/save", post(saved::save))
        .route("/save/{id}", delete(saved::unsave))
        .route("/saved/{user_id}", get(saved::list_by_user))
        .route("/purchase", post(purchase::purchase))
        .route("/purchases/{user_id}/{video_id}", get(purchase::check))
        .route("/{video_id}", get(video::get_by_id))
        .route("/{video_id}/like", post(like::replace_likes))
        .route("/{video_id}/like/toggle", post(like::toggle_like))
        .route("/{video_id}/playback", get(playback::playback))
}
