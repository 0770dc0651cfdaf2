//! Reservation Repository
//!
//! Read-side queries for the reservation ledger. All status mutations go
//! through `booking::lifecycle`.

use super::RepoResult;
use shared::models::{Reservation, ReservationStatus, ReservationWithCustomer};
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str = "SELECT reservation_id, room_number, customer_id, check_in_date, check_out_date, status, created_at, updated_at FROM reservations";

const RESERVATION_WITH_CUSTOMER_SELECT: &str = "SELECT r.reservation_id, r.room_number, r.customer_id, c.name as customer_name, r.check_in_date, r.check_out_date, r.status, r.created_at, r.updated_at FROM reservations r JOIN customers c ON r.customer_id = c.customer_id";

pub async fn find_all(
    pool: &SqlitePool,
    status: Option<ReservationStatus>,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<ReservationWithCustomer>> {
    let rows = if let Some(status) = status {
        let sql = format!(
            "{RESERVATION_WITH_CUSTOMER_SELECT} WHERE r.status = ? ORDER BY r.check_in_date DESC LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, ReservationWithCustomer>(&sql)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    } else {
        let sql = format!(
            "{RESERVATION_WITH_CUSTOMER_SELECT} ORDER BY r.check_in_date DESC LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, ReservationWithCustomer>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    };
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE reservation_id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active (room-holding) reservations for one room, soonest first
pub async fn find_active_by_room(
    pool: &SqlitePool,
    room_number: i64,
) -> RepoResult<Vec<Reservation>> {
    let sql = format!(
        "{RESERVATION_SELECT} WHERE room_number = ? AND status IN ('RESERVED', 'CHECKED_IN') ORDER BY check_in_date"
    );
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .bind(room_number)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
