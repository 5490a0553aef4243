//! Handlers for chat messages.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use boom_core::error::CoreError;
use boom_core::ids::{parse_id, require_id, IdInput};
use boom_core::types::DbId;
use boom_db::models::chat::{CreateMessage, MessageDetail};
use boom_db::repositories::{ChatRepo, MessageRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub chat: Option<IdInput>,
    #[serde(default)]
    pub content: String,
}

/// Query parameters for `GET /messages`.
#[derive(Debug, Deserialize)]
pub struct MessageListParams {
    pub chat_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A page of messages plus the total across all pages.
#[derive(Debug, Serialize)]
pub struct MessagePage {
    pub documents: Vec<MessageDetail>,
    pub total: i64,
}

async fn ensure_member(state: &AppState, chat_id: DbId, user_id: DbId) -> AppResult<()> {
    if ChatRepo::find_by_id(&state.pool, chat_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Chat",
            id: chat_id,
        }));
    }
    if !ChatRepo::is_member(&state.pool, chat_id, user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this chat".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/messages
///
/// The sender is the caller. Posting also moves the chat's latest message.
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MessageDetail>>)> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::invalid(
            "Message content is required",
        )));
    }
    let chat_id = require_id(input.chat.as_ref(), "chat")?;
    ensure_member(&state, chat_id, user.user_id).await?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            chat_id,
            sender_id: user.user_id,
            content: content.to_string(),
        },
    )
    .await?;

    tracing::info!(message_id = message.id, chat_id, user_id = user.user_id, "Message sent");

    let sender = UserRepo::find_summary(&state.pool, user.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MessageDetail { message, sender },
        }),
    ))
}

/// GET /api/v1/messages?chat_id=&limit=&offset=
///
/// Messages from the caller's chats, oldest first, with senders expanded.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MessageListParams>,
) -> AppResult<Json<DataResponse<MessagePage>>> {
    let chat_id = params
        .chat_id
        .as_deref()
        .map(|raw| parse_id(raw, "chat"))
        .transpose()?;
    if let Some(chat_id) = chat_id {
        ensure_member(&state, chat_id, user.user_id).await?;
    }

    let messages = MessageRepo::list_for_member(
        &state.pool,
        user.user_id,
        chat_id,
        params.limit,
        params.offset,
    )
    .await?;
    let total = MessageRepo::count_for_member(&state.pool, user.user_id, chat_id).await?;

    let mut sender_ids: Vec<DbId> = messages.iter().map(|m| m.sender_id).collect();
    sender_ids.sort_unstable();
    sender_ids.dedup();
    let senders = UserRepo::find_summaries(&state.pool, &sender_ids).await?;

    let documents = messages
        .into_iter()
        .map(|message| {
            let sender = senders.iter().find(|u| u.id == message.sender_id).cloned();
            MessageDetail { message, sender }
        })
        .collect();

    Ok(Json(DataResponse {
        data: MessagePage { documents, total },
    }))
}
