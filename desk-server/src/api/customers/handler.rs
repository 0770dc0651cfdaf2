//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::customer;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_id_card, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

/// Query params for listing customers
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Substring match against name, contact or id card
    pub q: Option<String>,
}

/// GET /api/customers - 获取客户列表 (可按关键字搜索)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => customer::search(&state.pool, q.trim()).await?,
        _ => customer::find_all(&state.pool).await?,
    };
    Ok(Json(customers))
}

/// GET /api/customers/:id - 获取单个客户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let found = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/customers - 登记客户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.contact, "contact", MAX_SHORT_TEXT_LEN)?;
    validate_id_card(&payload.id_card)?;

    let created = customer::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/customers/:id - 修改客户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(contact) = &payload.contact {
        validate_required_text(contact, "contact", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(id_card) = &payload.id_card {
        validate_id_card(id_card)?;
    }

    let updated = customer::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/customers/:id - 删除客户
///
/// 被预订引用的客户由外键约束拒绝删除，保持引用完整性。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = customer::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Customer {id} not found")));
    }
    Ok(Json(true))
}
