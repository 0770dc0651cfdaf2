//! Reservation API 模块 (预订管理)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/availability", get(handler::availability))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/cancel", post(handler::cancel))
}
