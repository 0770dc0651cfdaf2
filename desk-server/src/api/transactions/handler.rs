//! Transaction API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, require_admin};
use crate::core::ServerState;
use crate::db::repository::transaction;
use crate::utils::time;
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Transaction, TransactionCreate, TransactionWithGuest};

/// Query params for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/transactions - 获取交易列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TransactionWithGuest>>> {
    let rows = if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        let start_date = time::parse_date(&start)?;
        let end_date = time::parse_date(&end)?;
        transaction::find_by_date_range(
            &state.pool,
            time::day_start_millis(start_date),
            time::day_end_millis(end_date),
        )
        .await
    } else {
        transaction::find_all(&state.pool, query.limit, query.offset).await
    }?;

    Ok(Json(rows))
}

/// GET /api/transactions/:id - 获取单笔交易
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Transaction>> {
    let found = transaction::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/transactions - 登记收费项目
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    validate_amount(payload.amount, "amount")?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created = transaction::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// DELETE /api/transactions/:id - 删除交易 (仅管理员)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    require_admin(&current_user)?;

    let deleted = transaction::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Transaction {id} not found")));
    }
    tracing::info!(
        transaction_id = id,
        operator = %current_user.username,
        "Transaction deleted"
    );
    Ok(Json(true))
}
