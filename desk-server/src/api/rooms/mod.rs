//! Room API 模块 (客房管理)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/rooms", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{room_number}",
            get(handler::get_by_number)
                .put(handler::update)
                .delete(handler::delete),
        )
}
