//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`rooms`] - 客房管理接口
//! - [`customers`] - 客户管理接口
//! - [`reservations`] - 预订管理接口
//! - [`front_desk`] - 前台入住/退房接口
//! - [`transactions`] - 交易管理接口
//! - [`reports`] - 财务报表接口
//! - [`users`] - 用户管理接口 (管理员)
//! - [`concierge`] - 聊天伴侣接口

pub mod auth;
pub mod concierge;
pub mod customers;
pub mod front_desk;
pub mod health;
pub mod reports;
pub mod reservations;
pub mod rooms;
pub mod transactions;
pub mod users;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::require_auth;
use crate::core::ServerState;

/// Assemble the full application router with auth, trace and CORS layers
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(rooms::router())
        .merge(customers::router())
        .merge(reservations::router())
        .merge(front_desk::router())
        .merge(transactions::router())
        .merge(reports::router())
        .merge(users::router())
        .merge(concierge::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
