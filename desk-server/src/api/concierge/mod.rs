//! Concierge API 模块 (聊天伴侣)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/concierge/chat", post(handler::chat))
}
