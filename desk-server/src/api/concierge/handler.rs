//! Concierge Chat Handler
//!
//! Forwards one operator message to the remote endpoint. The transcript
//! lives in server state for the process lifetime; the booking core is
//! never touched from here.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_CHAT_PROMPT_LEN, validate_required_text};
use shared::client::{ChatReply, ChatRequest};

/// POST /api/concierge/chat - 与伴侣对话
pub async fn chat(
    State(state): State<ServerState>,
    Json(payload): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    validate_required_text(&payload.message, "message", MAX_CHAT_PROMPT_LEN)?;

    let mut session = state.chat_session.lock().await;
    let reply = state
        .chat_client
        .send(&mut session, payload.message.trim())
        .await?;

    Ok(Json(ChatReply { reply }))
}
