use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chats`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat::create_or_get))
}
