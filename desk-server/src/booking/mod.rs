//! Booking core
//!
//! The availability checker and the reservation/room lifecycle. This module
//! is the only writer of `rooms.status` and `reservations.status`; the API
//! layer and repositories read them but never mutate them directly.

pub mod availability;
pub mod lifecycle;
pub mod money;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use shared::models::ReservationStatus;
use thiserror::Error;

use crate::utils::AppError;

pub use availability::{Availability, check_availability};
pub use lifecycle::{
    CheckoutReceipt, cancel_reservation, check_in, check_out, create_reservation,
    update_reservation,
};

/// Booking core errors. Every operation validates its preconditions and
/// fails with one of these before touching any row.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Room {0} not found")]
    RoomNotFound(i64),

    #[error("Customer {0} not found")]
    CustomerNotFound(i64),

    #[error("Reservation {0} not found")]
    ReservationNotFound(i64),

    #[error("Check-out date {check_out} must be after check-in date {check_in}")]
    DateRangeInvalid {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room already booked for overlapping dates: {0}")]
    Conflict(String),

    #[error("Cannot {action} a reservation in {from:?} state")]
    InvalidTransition {
        from: ReservationStatus,
        action: &'static str,
    },

    #[error("No reserved booking matches room {room_number} and customer {customer_id}")]
    NoMatchingReservation { room_number: i64, customer_id: i64 },

    #[error("Room {0} is not occupied")]
    RoomNotOccupied(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::RoomNotFound(_)
            | BookingError::CustomerNotFound(_)
            | BookingError::ReservationNotFound(_)
            | BookingError::NoMatchingReservation { .. } => AppError::not_found(message),
            BookingError::DateRangeInvalid { .. } => AppError::validation(message),
            BookingError::Conflict(_) => AppError::conflict(message),
            BookingError::InvalidTransition { .. } | BookingError::RoomNotOccupied(_) => {
                AppError::business_rule(message)
            }
            BookingError::Storage(_) => AppError::database(message),
        }
    }
}
