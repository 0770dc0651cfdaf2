//! Room Model

use serde::{Deserialize, Serialize};

/// Occupancy state of a room. Single source of truth, written only by the
/// booking lifecycle; stored as text (`VACANT` / `RESERVED` / `OCCUPIED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoomStatus {
    Vacant,
    Reserved,
    Occupied,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Vacant => "VACANT",
            RoomStatus::Reserved => "RESERVED",
            RoomStatus::Occupied => "OCCUPIED",
        }
    }
}

/// Housekeeping state, independent of occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CleanStatus {
    Clean,
    Dirty,
}

impl CleanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanStatus::Clean => "CLEAN",
            CleanStatus::Dirty => "DIRTY",
        }
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub room_number: i64,
    pub room_type: String,
    pub price: f64,
    pub status: RoomStatus,
    pub clean_status: CleanStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload. New rooms always start `Vacant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_number: i64,
    pub room_type: String,
    pub price: f64,
    pub clean_status: Option<CleanStatus>,
}

/// Update room payload. Occupancy status is deliberately absent: only the
/// booking lifecycle may change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub clean_status: Option<CleanStatus>,
}
