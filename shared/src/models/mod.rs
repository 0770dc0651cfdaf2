//! Domain Models
//!
//! Entity structs and their create/update payloads. All IDs are snowflake
//! i64s except `room_number`, which is the operator-entered natural key.

pub mod customer;
pub mod report;
pub mod reservation;
pub mod room;
pub mod transaction;
pub mod user;

pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use report::{DailyIncome, FinanceSummary};
pub use reservation::{
    Reservation, ReservationCreate, ReservationStatus, ReservationUpdate, ReservationWithCustomer,
};
pub use room::{CleanStatus, Room, RoomCreate, RoomStatus, RoomUpdate};
pub use transaction::{Transaction, TransactionCreate, TransactionWithGuest};
pub use user::{User, UserCreate, UserRole, UserUpdate};
