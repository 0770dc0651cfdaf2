//! Finance Report Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income overview shown on the finance screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub today_income: f64,
    pub month_income: f64,
    /// Distinct reservations with at least one transaction
    pub reservation_count: i64,
    pub avg_income_per_reservation: f64,
}

/// One bar of the last-7-days income chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyIncome {
    pub date: NaiveDate,
    pub amount: f64,
}
