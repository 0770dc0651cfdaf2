//! Auth API 模块 (登录)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}
