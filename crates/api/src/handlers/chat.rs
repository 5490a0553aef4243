//! Handlers for direct-message chats.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use boom_core::chat::{chat_members, users_hash};
use boom_core::error::CoreError;
use boom_core::ids::IdInput;
use boom_core::types::DbId;
use boom_db::models::chat::{Chat, ChatDetail, CreateChat};
use boom_db::repositories::{ChatRepo, MessageRepo, UserRepo};
use boom_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /chats`.
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub chat_name: Option<String>,
    /// Defaults to `true` when the chat has more than two members.
    pub is_group_chat: Option<bool>,
    /// Other participants; the caller is added automatically.
    #[serde(default)]
    pub users: Vec<IdInput>,
}

/// Expand members and the latest message.
async fn chat_detail(pool: &DbPool, chat: Chat) -> AppResult<ChatDetail> {
    let member_ids = ChatRepo::list_member_ids(pool, chat.id).await?;
    let mut users = UserRepo::find_summaries(pool, &member_ids).await?;
    users.sort_by_key(|u| u.id);

    let latest_message = match chat.latest_message_id {
        Some(id) => MessageRepo::find_by_id(pool, id).await?,
        None => None,
    };

    Ok(ChatDetail {
        chat,
        users,
        latest_message,
    })
}

/// POST /api/v1/chats
///
/// Returns the existing chat for this member set (200) or creates it (201).
pub async fn create_or_get(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateChatRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatDetail>>)> {
    let requested = input
        .users
        .iter()
        .map(|id| id.resolve("user"))
        .collect::<Result<Vec<DbId>, _>>()?;
    let members = chat_members(user.user_id, &requested)?;
    let hash = users_hash(&members);

    if let Some(chat) = ChatRepo::find_by_users_hash(&state.pool, &hash).await? {
        let data = chat_detail(&state.pool, chat).await?;
        return Ok((StatusCode::OK, Json(DataResponse { data })));
    }

    if let Some(&missing) = UserRepo::missing_ids(&state.pool, &members).await?.first() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: missing,
        }));
    }

    let chat = ChatRepo::create(
        &state.pool,
        &CreateChat {
            chat_name: input.chat_name.unwrap_or_default().trim().to_string(),
            is_group_chat: input.is_group_chat.unwrap_or(members.len() > 2),
            users_hash: hash,
            member_ids: members,
        },
    )
    .await?;

    tracing::info!(chat_id = chat.id, user_id = user.user_id, "Chat created");

    let data = chat_detail(&state.pool, chat).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}
