//! Front Desk Handlers
//!
//! Check-in requires the room/customer pair to match a reserved booking
//! exactly; check-out completes the stay and writes the stay charge.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::booking;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::Reservation;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub room_number: i64,
    pub customer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub room_number: i64,
}

/// POST /api/front-desk/check-in - 办理入住
pub async fn check_in(
    State(state): State<ServerState>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<Reservation>> {
    let checked_in =
        booking::check_in(&state.pool, payload.room_number, payload.customer_id).await?;
    Ok(Json(checked_in))
}

/// POST /api/front-desk/check-out - 办理退房
pub async fn check_out(
    State(state): State<ServerState>,
    Json(payload): Json<CheckOutRequest>,
) -> AppResult<Json<booking::CheckoutReceipt>> {
    let receipt = booking::check_out(&state.pool, payload.room_number).await?;
    Ok(Json(receipt))
}
