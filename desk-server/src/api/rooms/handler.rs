//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::room;
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Room, RoomCreate, RoomUpdate};

/// GET /api/rooms - 获取客房列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:room_number - 获取单个客房
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(room_number): Path<i64>,
) -> AppResult<Json<Room>> {
    let found = room::find_by_number(&state.pool, room_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {room_number} not found")))?;
    Ok(Json(found))
}

/// POST /api/rooms - 新增客房
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    if payload.room_number <= 0 {
        return Err(AppError::validation("room_number must be positive"));
    }
    validate_required_text(&payload.room_type, "room_type", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;

    let created = room::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/rooms/:room_number - 修改客房
pub async fn update(
    State(state): State<ServerState>,
    Path(room_number): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    if let Some(room_type) = &payload.room_type {
        validate_required_text(room_type, "room_type", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }

    let updated = room::update(&state.pool, room_number, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/rooms/:room_number - 删除客房
///
/// 有预订记录的客房由外键约束拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(room_number): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room::delete(&state.pool, room_number).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room {room_number} not found")));
    }
    Ok(Json(true))
}
