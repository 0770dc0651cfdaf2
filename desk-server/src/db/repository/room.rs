//! Room Repository

use super::{RepoError, RepoResult};
use shared::models::{CleanStatus, Room, RoomCreate, RoomStatus, RoomUpdate};
use sqlx::SqlitePool;

const ROOM_SELECT: &str = "SELECT room_number, room_type, price, status, clean_status, created_at, updated_at FROM rooms";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let sql = format!("{ROOM_SELECT} ORDER BY room_number");
    let rows = sqlx::query_as::<_, Room>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_number(pool: &SqlitePool, room_number: i64) -> RepoResult<Option<Room>> {
    let sql = format!("{ROOM_SELECT} WHERE room_number = ?");
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(room_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    if find_by_number(pool, data.room_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Room {} already exists",
            data.room_number
        )));
    }

    let now = shared::util::now_millis();
    let clean_status = data.clean_status.unwrap_or(CleanStatus::Clean);
    sqlx::query(
        "INSERT INTO rooms (room_number, room_type, price, status, clean_status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(data.room_number)
    .bind(&data.room_type)
    .bind(data.price)
    .bind(RoomStatus::Vacant)
    .bind(clean_status)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_number(pool, data.room_number)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, room_number: i64, data: RoomUpdate) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE rooms SET room_type = COALESCE(?1, room_type), price = COALESCE(?2, price), clean_status = COALESCE(?3, clean_status), updated_at = ?4 WHERE room_number = ?5",
    )
    .bind(data.room_type)
    .bind(data.price)
    .bind(data.clean_status)
    .bind(now)
    .bind(room_number)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {room_number} not found")));
    }
    find_by_number(pool, room_number)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {room_number} not found")))
}

/// Hard delete. Rooms with reservation history are rejected by the
/// RESTRICT foreign key and surface as [`RepoError::Conflict`].
pub async fn delete(pool: &SqlitePool, room_number: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM rooms WHERE room_number = ?")
        .bind(room_number)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
