//! Reports API 模块 (财务报表)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/finance", get(handler::finance_summary))
        .route("/finance/daily", get(handler::daily_income))
        .route("/finance/export", get(handler::export_csv))
}
