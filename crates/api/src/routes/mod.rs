pub mod auth;
pub mod chat;
pub mod health;
pub mod message;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                                 register (public)
/// /auth/login                                    login (public)
///
/// /videos                                        upload (POST, multipart)
/// /videos/recent                                 feed
/// /videos/save                                   save (POST)
/// /videos/save/{id}                              unsave (DELETE)
/// /videos/saved/{user_id}                        saved list
/// /videos/purchase                               purchase (POST)
/// /videos/purchases/{user_id}/{video_id}         purchase status
/// /videos/{video_id}                             get
/// /videos/{video_id}/like                        replace like list (POST)
/// /videos/{video_id}/like/toggle                 toggle caller's like (POST)
/// /videos/{video_id}/playback                    playback check (optional auth)
///
/// /chats                                         find or create (POST)
/// /messages                                      send (POST), list (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/videos", video::router())
        .nest("/chats", chat::router())
        .nest("/messages", message::router())
}
