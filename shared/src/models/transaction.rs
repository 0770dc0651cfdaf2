//! Transaction Model

use serde::{Deserialize, Serialize};

/// Ledger row for money received. Immutable once written; only explicit
/// admin deletion removes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub transaction_id: i64,
    pub reservation_id: Option<i64>,
    pub amount: f64,
    /// Unix millis
    pub transaction_date: i64,
    pub description: String,
}

/// Create transaction payload (ad-hoc charge entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub reservation_id: Option<i64>,
    pub amount: f64,
    pub description: String,
}

/// Transaction joined with room and guest info (for finance views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TransactionWithGuest {
    pub transaction_id: i64,
    pub reservation_id: Option<i64>,
    pub room_number: Option<i64>,
    pub customer_name: Option<String>,
    pub amount: f64,
    pub transaction_date: i64,
    pub description: String,
}
