//! Reservation Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a reservation.
///
/// Valid transitions: `Reserved -> CheckedIn -> Completed` and
/// `Reserved -> Cancelled`. `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ReservationStatus {
    Reserved,
    CheckedIn,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Reserved => "RESERVED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Completed => "COMPLETED",
        }
    }

    /// Reserved and CheckedIn rows hold the room; terminal rows do not.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Reserved | ReservationStatus::CheckedIn)
    }
}

/// Reservation entity. Dates form the half-open stay interval
/// `[check_in_date, check_out_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub reservation_id: i64,
    pub room_number: i64,
    pub customer_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub room_number: i64,
    pub customer_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// Update reservation payload (only `Reserved` rows may be modified)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub room_number: Option<i64>,
    pub customer_id: Option<i64>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

/// Reservation with guest name (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithCustomer {
    pub reservation_id: i64,
    pub room_number: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
