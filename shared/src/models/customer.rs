//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity (guest registry row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub contact: String,
    /// National ID number, unique, checksum-validated before insert
    pub id_card: String,
    pub points: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub contact: String,
    pub id_card: String,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub id_card: Option<String>,
}
