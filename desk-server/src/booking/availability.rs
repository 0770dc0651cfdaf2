//! Availability Checker
//!
//! Pure read-side decision: may a stay `[check_in, check_out)` be booked on
//! a room? Two half-open intervals `[a, b)` and `[c, d)` overlap iff
//! `a < d && c < b`, so a stay ending on the day another begins does not
//! collide. One SQL predicate expresses the rule for every call site.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};

use super::BookingError;

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Availability {
    Available,
    Conflict { reason: String },
}

/// Check whether a room can take a reservation over the given half-open
/// date range.
///
/// `excluding` skips one reservation id, used when re-checking while
/// modifying that reservation's own dates.
pub async fn check_availability(
    pool: &SqlitePool,
    room_number: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    excluding: Option<i64>,
) -> Result<Availability, BookingError> {
    let mut conn = pool.acquire().await?;
    check_on(&mut conn, room_number, check_in, check_out, excluding).await
}

/// Connection-level variant so lifecycle operations can re-check inside
/// their own transaction.
pub(crate) async fn check_on(
    conn: &mut SqliteConnection,
    room_number: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    excluding: Option<i64>,
) -> Result<Availability, BookingError> {
    if check_out <= check_in {
        return Err(BookingError::DateRangeInvalid {
            check_in,
            check_out,
        });
    }

    let room_exists: Option<i64> =
        sqlx::query_scalar("SELECT room_number FROM rooms WHERE room_number = ?")
            .bind(room_number)
            .fetch_optional(&mut *conn)
            .await?;
    if room_exists.is_none() {
        return Err(BookingError::RoomNotFound(room_number));
    }

    // Overlap predicate over room-holding rows only; cancelled and completed
    // reservations never block a booking.
    let conflicts: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations \
         WHERE room_number = ?1 \
           AND status IN ('RESERVED', 'CHECKED_IN') \
           AND (?2 IS NULL OR reservation_id <> ?2) \
           AND check_in_date < ?4 \
           AND check_out_date > ?3",
    )
    .bind(room_number)
    .bind(excluding)
    .bind(check_in)
    .bind(check_out)
    .fetch_one(&mut *conn)
    .await?;

    if conflicts > 0 {
        return Ok(Availability::Conflict {
            reason: format!(
                "Room {room_number} already has {conflicts} active reservation(s) between {check_in} and {check_out}"
            ),
        });
    }

    Ok(Availability::Available)
}
