//! Transaction Repository

use chrono::NaiveDate;

use super::{RepoError, RepoResult};
use crate::utils::time;
use shared::models::{DailyIncome, FinanceSummary, Transaction, TransactionCreate, TransactionWithGuest};
use sqlx::SqlitePool;

const TRANSACTION_SELECT: &str = "SELECT transaction_id, reservation_id, amount, transaction_date, description FROM transactions";

const TRANSACTION_WITH_GUEST_SELECT: &str = "SELECT t.transaction_id, t.reservation_id, r.room_number, c.name as customer_name, t.amount, t.transaction_date, t.description FROM transactions t LEFT JOIN reservations r ON t.reservation_id = r.reservation_id LEFT JOIN customers c ON r.customer_id = c.customer_id";

pub async fn find_all(
    pool: &SqlitePool,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<TransactionWithGuest>> {
    let sql = format!(
        "{TRANSACTION_WITH_GUEST_SELECT} ORDER BY t.transaction_date DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, TransactionWithGuest>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<TransactionWithGuest>> {
    let sql = format!(
        "{TRANSACTION_WITH_GUEST_SELECT} WHERE t.transaction_date >= ? AND t.transaction_date < ? ORDER BY t.transaction_date DESC"
    );
    let rows = sqlx::query_as::<_, TransactionWithGuest>(&sql)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Transaction>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE transaction_id = ?");
    let row = sqlx::query_as::<_, Transaction>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Ad-hoc charge entry. Stay charges are written by `booking::lifecycle`
/// inside the checkout transaction instead.
pub async fn create(pool: &SqlitePool, data: TransactionCreate) -> RepoResult<Transaction> {
    if let Some(reservation_id) = data.reservation_id {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT reservation_id FROM reservations WHERE reservation_id = ?")
                .bind(reservation_id)
                .fetch_optional(pool)
                .await?;
        if exists.is_none() {
            return Err(RepoError::NotFound(format!(
                "Reservation {reservation_id} not found"
            )));
        }
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO transactions (transaction_id, reservation_id, amount, transaction_date, description) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(data.reservation_id)
    .bind(data.amount)
    .bind(now)
    .bind(&data.description)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create transaction".into()))
}

/// Admin-only hard delete
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM transactions WHERE transaction_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Income overview: all-time / today / this month totals plus per-reservation
/// averages, computed against UTC calendar windows.
pub async fn finance_summary(pool: &SqlitePool, today: NaiveDate) -> RepoResult<FinanceSummary> {
    let total_income: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM transactions")
            .fetch_one(pool)
            .await?;

    let today_income: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE transaction_date >= ? AND transaction_date < ?",
    )
    .bind(time::day_start_millis(today))
    .bind(time::day_end_millis(today))
    .fetch_one(pool)
    .await?;

    let month_income: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE transaction_date >= ? AND transaction_date < ?",
    )
    .bind(time::month_start_millis(today))
    .bind(time::day_end_millis(today))
    .fetch_one(pool)
    .await?;

    let reservation_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT reservation_id) FROM transactions WHERE reservation_id IS NOT NULL",
    )
    .fetch_one(pool)
    .await?;

    let avg_income_per_reservation = if reservation_count > 0 {
        total_income / reservation_count as f64
    } else {
        0.0
    };

    Ok(FinanceSummary {
        total_income,
        today_income,
        month_income,
        reservation_count,
        avg_income_per_reservation,
    })
}

/// Daily income for the 7-day window ending at `today` (inclusive).
/// Days without transactions are filled with zero.
pub async fn daily_income(pool: &SqlitePool, today: NaiveDate) -> RepoResult<Vec<DailyIncome>> {
    let start = today - chrono::Duration::days(6);
    let rows: Vec<(String, f64)> = sqlx::query_as(
        "SELECT date(transaction_date / 1000, 'unixepoch') as day, SUM(amount) FROM transactions WHERE transaction_date >= ? AND transaction_date < ? GROUP BY day ORDER BY day",
    )
    .bind(time::day_start_millis(start))
    .bind(time::day_end_millis(today))
    .fetch_all(pool)
    .await?;

    let mut by_day = std::collections::HashMap::new();
    for (day, amount) in rows {
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
            .map_err(|e| RepoError::Database(format!("Unparseable day bucket {day}: {e}")))?;
        by_day.insert(date, amount);
    }

    let mut out = Vec::with_capacity(7);
    for offset in 0..7 {
        let date = start + chrono::Duration::days(offset);
        out.push(DailyIncome {
            date,
            amount: by_day.get(&date).copied().unwrap_or(0.0),
        });
    }
    Ok(out)
}
