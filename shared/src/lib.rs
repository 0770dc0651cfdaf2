//! Shared types for the front-desk workspace
//!
//! Domain models, status enumerations and client-facing DTOs used by both
//! the desk-server and its callers. Database derives are feature-gated
//! behind `db` so UI-side consumers stay dependency-light.

pub mod client;
pub mod models;
pub mod util;

pub use models::{
    CleanStatus, Customer, CustomerCreate, CustomerUpdate, Reservation, ReservationCreate,
    ReservationStatus, ReservationUpdate, Room, RoomCreate, RoomStatus, RoomUpdate, Transaction,
    TransactionCreate, User, UserCreate, UserRole, UserUpdate,
};
