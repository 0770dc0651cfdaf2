//! Reservation API Handlers
//!
//! CRUD endpoints delegate all status work to `booking`: create, update and
//! cancel go through the lifecycle coordinator, the availability probe
//! through the checker.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::booking;
use crate::core::ServerState;
use crate::db::repository::reservation;
use crate::utils::{AppError, AppResult};
use shared::models::{
    Reservation, ReservationCreate, ReservationStatus, ReservationUpdate, ReservationWithCustomer,
};

/// Query params for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ReservationStatus>,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// Query params for the availability probe
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub room_number: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Reservation to skip when re-checking a pending modification
    pub excluding: Option<i64>,
}

/// GET /api/reservations - 获取预订列表 (可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReservationWithCustomer>>> {
    let rows =
        reservation::find_all(&state.pool, query.status, query.limit, query.offset).await?;
    Ok(Json(rows))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let found = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
    Ok(Json(found))
}

/// GET /api/reservations/availability - 查询日期段是否可订
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<booking::Availability>> {
    let outcome = booking::check_availability(
        &state.pool,
        query.room_number,
        query.check_in_date,
        query.check_out_date,
        query.excluding,
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/reservations - 新增预订
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let created = booking::create_reservation(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/reservations/:id - 修改预订 (仅限 Reserved 状态)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let updated = booking::update_reservation(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// POST /api/reservations/:id/cancel - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let cancelled = booking::cancel_reservation(&state.pool, id).await?;
    Ok(Json(cancelled))
}
