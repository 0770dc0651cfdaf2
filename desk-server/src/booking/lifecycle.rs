//! Lifecycle Coordinator
//!
//! Drives every reservation and room status transition:
//! `Reserved -> CheckedIn -> Completed`, with `Reserved -> Cancelled` as the
//! only other valid edge. Each operation runs inside one SQLite transaction
//! so the check-then-act sequence commits atomically; callers never observe
//! a reservation row without the matching room status update.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};

use shared::models::{
    CleanStatus, Reservation, ReservationCreate, ReservationStatus, ReservationUpdate,
    RoomStatus, Transaction,
};
use shared::util::{now_millis, snowflake_id};

use super::{Availability, BookingError, availability, money};
use crate::utils::time::today;

const RESERVATION_SELECT: &str = "SELECT reservation_id, room_number, customer_id, check_in_date, check_out_date, status, created_at, updated_at FROM reservations";

/// Result of a checkout: the completed reservation and the stay charge
/// written for it.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub reservation: Reservation,
    pub charge: Transaction,
    pub nights: i64,
}

/// Create a reservation after validating the customer, the room and the
/// requested date range against existing active bookings.
pub async fn create_reservation(
    pool: &SqlitePool,
    data: ReservationCreate,
) -> Result<Reservation, BookingError> {
    let mut tx = pool.begin().await?;

    let customer_exists: Option<i64> =
        sqlx::query_scalar("SELECT customer_id FROM customers WHERE customer_id = ?")
            .bind(data.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
    if customer_exists.is_none() {
        return Err(BookingError::CustomerNotFound(data.customer_id));
    }

    // Validates room existence and the date range as well
    match availability::check_on(
        &mut tx,
        data.room_number,
        data.check_in_date,
        data.check_out_date,
        None,
    )
    .await?
    {
        Availability::Conflict { reason } => return Err(BookingError::Conflict(reason)),
        Availability::Available => {}
    }

    let now = now_millis();
    let reservation_id = snowflake_id();
    sqlx::query(
        "INSERT INTO reservations (reservation_id, room_number, customer_id, check_in_date, check_out_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(reservation_id)
    .bind(data.room_number)
    .bind(data.customer_id)
    .bind(data.check_in_date)
    .bind(data.check_out_date)
    .bind(ReservationStatus::Reserved)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // Vacant -> Reserved; a room held by other active bookings keeps its
    // current state (Occupied outranks Reserved).
    recompute_room_status(&mut tx, data.room_number, today()).await?;

    let created = fetch_reservation(&mut tx, reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation_id))?;

    tx.commit().await?;
    tracing::info!(
        reservation_id,
        room_number = data.room_number,
        customer_id = data.customer_id,
        "Reservation created"
    );
    Ok(created)
}

/// Move a `Reserved` booking to new dates, a new room and/or a new customer,
/// re-checking availability with the booking itself excluded from the scan.
pub async fn update_reservation(
    pool: &SqlitePool,
    reservation_id: i64,
    data: ReservationUpdate,
) -> Result<Reservation, BookingError> {
    let mut tx = pool.begin().await?;

    let existing = fetch_reservation(&mut tx, reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation_id))?;
    if existing.status != ReservationStatus::Reserved {
        return Err(BookingError::InvalidTransition {
            from: existing.status,
            action: "modify",
        });
    }

    let room_number = data.room_number.unwrap_or(existing.room_number);
    let customer_id = data.customer_id.unwrap_or(existing.customer_id);
    let check_in_date = data.check_in_date.unwrap_or(existing.check_in_date);
    let check_out_date = data.check_out_date.unwrap_or(existing.check_out_date);

    if customer_id != existing.customer_id {
        let customer_exists: Option<i64> =
            sqlx::query_scalar("SELECT customer_id FROM customers WHERE customer_id = ?")
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;
        if customer_exists.is_none() {
            return Err(BookingError::CustomerNotFound(customer_id));
        }
    }

    match availability::check_on(
        &mut tx,
        room_number,
        check_in_date,
        check_out_date,
        Some(reservation_id),
    )
    .await?
    {
        Availability::Conflict { reason } => return Err(BookingError::Conflict(reason)),
        Availability::Available => {}
    }

    sqlx::query(
        "UPDATE reservations SET room_number = ?1, customer_id = ?2, check_in_date = ?3, check_out_date = ?4, updated_at = ?5 WHERE reservation_id = ?6",
    )
    .bind(room_number)
    .bind(customer_id)
    .bind(check_in_date)
    .bind(check_out_date)
    .bind(now_millis())
    .bind(reservation_id)
    .execute(&mut *tx)
    .await?;

    recompute_room_status(&mut tx, existing.room_number, today()).await?;
    if room_number != existing.room_number {
        recompute_room_status(&mut tx, room_number, today()).await?;
    }

    let updated = fetch_reservation(&mut tx, reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation_id))?;

    tx.commit().await?;
    tracing::info!(reservation_id, room_number, "Reservation updated");
    Ok(updated)
}

/// Cancel a `Reserved` booking and release the room if nothing else holds it.
pub async fn cancel_reservation(
    pool: &SqlitePool,
    reservation_id: i64,
) -> Result<Reservation, BookingError> {
    let mut tx = pool.begin().await?;

    let existing = fetch_reservation(&mut tx, reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation_id))?;
    if existing.status != ReservationStatus::Reserved {
        return Err(BookingError::InvalidTransition {
            from: existing.status,
            action: "cancel",
        });
    }

    sqlx::query(
        "UPDATE reservations SET status = ?1, updated_at = ?2 WHERE reservation_id = ?3 AND status = ?4",
    )
    .bind(ReservationStatus::Cancelled)
    .bind(now_millis())
    .bind(reservation_id)
    .bind(ReservationStatus::Reserved)
    .execute(&mut *tx)
    .await?;

    recompute_room_status(&mut tx, existing.room_number, today()).await?;

    let cancelled = fetch_reservation(&mut tx, reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation_id))?;

    tx.commit().await?;
    tracing::info!(
        reservation_id,
        room_number = existing.room_number,
        "Reservation cancelled"
    );
    Ok(cancelled)
}

/// Check a guest in. The room/customer pair must match a `Reserved` row
/// exactly; holding some other reservation on the room is not enough.
pub async fn check_in(
    pool: &SqlitePool,
    room_number: i64,
    customer_id: i64,
) -> Result<Reservation, BookingError> {
    let mut tx = pool.begin().await?;

    let room_status: Option<RoomStatus> =
        sqlx::query_scalar("SELECT status FROM rooms WHERE room_number = ?")
            .bind(room_number)
            .fetch_optional(&mut *tx)
            .await?;
    let room_status = room_status.ok_or(BookingError::RoomNotFound(room_number))?;

    let sql = format!(
        "{RESERVATION_SELECT} WHERE room_number = ?1 AND customer_id = ?2 AND status = ?3 ORDER BY check_in_date LIMIT 1"
    );
    let reservation: Option<Reservation> = sqlx::query_as(&sql)
        .bind(room_number)
        .bind(customer_id)
        .bind(ReservationStatus::Reserved)
        .fetch_optional(&mut *tx)
        .await?;
    let reservation = reservation.ok_or(BookingError::NoMatchingReservation {
        room_number,
        customer_id,
    })?;

    // One CheckedIn row per room: an occupied room cannot take another guest
    if room_status == RoomStatus::Occupied {
        return Err(BookingError::Conflict(format!(
            "Room {room_number} is currently occupied"
        )));
    }

    let now = now_millis();
    sqlx::query(
        "UPDATE reservations SET status = ?1, updated_at = ?2 WHERE reservation_id = ?3 AND status = ?4",
    )
    .bind(ReservationStatus::CheckedIn)
    .bind(now)
    .bind(reservation.reservation_id)
    .bind(ReservationStatus::Reserved)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE rooms SET status = ?1, updated_at = ?2 WHERE room_number = ?3")
        .bind(RoomStatus::Occupied)
        .bind(now)
        .bind(room_number)
        .execute(&mut *tx)
        .await?;

    let checked_in = fetch_reservation(&mut tx, reservation.reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation.reservation_id))?;

    tx.commit().await?;
    tracing::info!(
        reservation_id = reservation.reservation_id,
        room_number,
        customer_id,
        "Guest checked in"
    );
    Ok(checked_in)
}

/// Check a room out: complete the stay, mark the room vacant and dirty,
/// write the stay charge (nightly price × nights) and award the guest one
/// loyalty point per whole currency unit spent.
pub async fn check_out(
    pool: &SqlitePool,
    room_number: i64,
) -> Result<CheckoutReceipt, BookingError> {
    let mut tx = pool.begin().await?;

    let room: Option<(f64, RoomStatus)> =
        sqlx::query_as("SELECT price, status FROM rooms WHERE room_number = ?")
            .bind(room_number)
            .fetch_optional(&mut *tx)
            .await?;
    let (price, room_status) = room.ok_or(BookingError::RoomNotFound(room_number))?;
    if room_status != RoomStatus::Occupied {
        return Err(BookingError::RoomNotOccupied(room_number));
    }

    let sql = format!("{RESERVATION_SELECT} WHERE room_number = ?1 AND status = ?2 LIMIT 1");
    let reservation: Option<Reservation> = sqlx::query_as(&sql)
        .bind(room_number)
        .bind(ReservationStatus::CheckedIn)
        .fetch_optional(&mut *tx)
        .await?;
    // The ledger is the source of truth: no CheckedIn row means the room is
    // not actually occupied, whatever its status column claims.
    let reservation = reservation.ok_or(BookingError::RoomNotOccupied(room_number))?;

    let nights = (reservation.check_out_date - reservation.check_in_date).num_days();
    let charge_amount = money::stay_charge(price, nights);

    let now = now_millis();
    sqlx::query(
        "UPDATE reservations SET status = ?1, updated_at = ?2 WHERE reservation_id = ?3 AND status = ?4",
    )
    .bind(ReservationStatus::Completed)
    .bind(now)
    .bind(reservation.reservation_id)
    .bind(ReservationStatus::CheckedIn)
    .execute(&mut *tx)
    .await?;

    recompute_room_status(&mut tx, room_number, today()).await?;
    sqlx::query("UPDATE rooms SET clean_status = ?1, updated_at = ?2 WHERE room_number = ?3")
        .bind(CleanStatus::Dirty)
        .bind(now)
        .bind(room_number)
        .execute(&mut *tx)
        .await?;

    let transaction_id = snowflake_id();
    sqlx::query(
        "INSERT INTO transactions (transaction_id, reservation_id, amount, transaction_date, description) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(transaction_id)
    .bind(reservation.reservation_id)
    .bind(charge_amount)
    .bind(now)
    .bind(format!("Room charge: {nights} night(s)"))
    .execute(&mut *tx)
    .await?;

    let points_earned = charge_amount.floor() as i64;
    sqlx::query(
        "UPDATE customers SET points = points + ?1, updated_at = ?2 WHERE customer_id = ?3",
    )
    .bind(points_earned)
    .bind(now)
    .bind(reservation.customer_id)
    .execute(&mut *tx)
    .await?;

    let completed = fetch_reservation(&mut tx, reservation.reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(reservation.reservation_id))?;
    let charge: Transaction = sqlx::query_as(
        "SELECT transaction_id, reservation_id, amount, transaction_date, description FROM transactions WHERE transaction_id = ?",
    )
    .bind(transaction_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!(
        reservation_id = reservation.reservation_id,
        room_number,
        nights,
        amount = charge_amount,
        "Guest checked out"
    );
    Ok(CheckoutReceipt {
        reservation: completed,
        charge,
        nights,
    })
}

/// Derive and store a room's status from its ledger rows:
/// Occupied when a CheckedIn row exists, Reserved when an active Reserved
/// row still covers today or a future date, Vacant otherwise.
async fn recompute_room_status(
    conn: &mut SqliteConnection,
    room_number: i64,
    today: NaiveDate,
) -> Result<(), BookingError> {
    let checked_in: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations WHERE room_number = ?1 AND status = ?2",
    )
    .bind(room_number)
    .bind(ReservationStatus::CheckedIn)
    .fetch_one(&mut *conn)
    .await?;

    let status = if checked_in > 0 {
        RoomStatus::Occupied
    } else {
        let upcoming: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE room_number = ?1 AND status = ?2 AND check_out_date > ?3",
        )
        .bind(room_number)
        .bind(ReservationStatus::Reserved)
        .bind(today)
        .fetch_one(&mut *conn)
        .await?;
        if upcoming > 0 {
            RoomStatus::Reserved
        } else {
            RoomStatus::Vacant
        }
    };

    sqlx::query("UPDATE rooms SET status = ?1, updated_at = ?2 WHERE room_number = ?3")
        .bind(status)
        .bind(now_millis())
        .bind(room_number)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn fetch_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<Option<Reservation>, BookingError> {
    let sql = format!("{RESERVATION_SELECT} WHERE reservation_id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(reservation_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}
