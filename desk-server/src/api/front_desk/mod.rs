//! Front Desk API 模块 (入住/退房)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/front-desk", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/check-in", post(handler::check_in))
        .route("/check-out", post(handler::check_out))
}
