//! Finance Report Handlers
//!
//! Income overview, last-7-days breakdown and CSV export of the summary
//! plus full transaction detail.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::core::ServerState;
use crate::db::repository::transaction;
use crate::utils::{AppResult, time};
use shared::models::{DailyIncome, FinanceSummary, TransactionWithGuest};

/// GET /api/reports/finance - 收入概览
pub async fn finance_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<FinanceSummary>> {
    let summary = transaction::finance_summary(&state.pool, time::today()).await?;
    Ok(Json(summary))
}

/// GET /api/reports/finance/daily - 过去 7 天每日收入
pub async fn daily_income(State(state): State<ServerState>) -> AppResult<Json<Vec<DailyIncome>>> {
    let days = transaction::daily_income(&state.pool, time::today()).await?;
    Ok(Json(days))
}

/// GET /api/reports/finance/export - 导出财务报表 (CSV)
pub async fn export_csv(State(state): State<ServerState>) -> AppResult<Response> {
    let today = time::today();
    let summary = transaction::finance_summary(&state.pool, today).await?;
    // Full detail, newest first
    let detail = transaction::find_all(&state.pool, i32::MAX, 0).await?;

    let csv = build_finance_csv(&summary, &detail);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"finance_report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Quote a CSV field when it contains separators, quotes or newlines
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn build_finance_csv(summary: &FinanceSummary, detail: &[TransactionWithGuest]) -> String {
    let mut out = String::new();

    out.push_str("Hotel Front Desk Finance Report\n");
    out.push_str(&format!(
        "Generated,{}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("Summary\n");
    out.push_str(&format!("Total income,{:.2}\n", summary.total_income));
    out.push_str(&format!("Today income,{:.2}\n", summary.today_income));
    out.push_str(&format!("Month income,{:.2}\n", summary.month_income));
    out.push_str(&format!("Reservations billed,{}\n", summary.reservation_count));
    out.push_str(&format!(
        "Average per reservation,{:.2}\n\n",
        summary.avg_income_per_reservation
    ));

    out.push_str("Transactions\n");
    out.push_str("Transaction ID,Reservation ID,Room,Guest,Amount,Date,Description\n");
    for t in detail {
        let date = chrono::DateTime::from_timestamp_millis(t.transaction_date)
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{:.2},{},{}\n",
            t.transaction_id,
            t.reservation_id.map(|id| id.to_string()).unwrap_or_default(),
            t.room_number.map(|n| n.to_string()).unwrap_or_default(),
            csv_field(t.customer_name.as_deref().unwrap_or("")),
            t.amount,
            date,
            csv_field(&t.description),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn report_contains_summary_and_detail_rows() {
        let summary = FinanceSummary {
            total_income: 900.0,
            today_income: 600.0,
            month_income: 900.0,
            reservation_count: 2,
            avg_income_per_reservation: 450.0,
        };
        let detail = vec![TransactionWithGuest {
            transaction_id: 1,
            reservation_id: Some(11),
            room_number: Some(101),
            customer_name: Some("Alice, A.".to_string()),
            amount: 600.0,
            transaction_date: 1_750_000_000_000,
            description: "Room charge: 2 night(s)".to_string(),
        }];

        let csv = build_finance_csv(&summary, &detail);
        assert!(csv.contains("Total income,900.00"));
        assert!(csv.contains("Average per reservation,450.00"));
        assert!(csv.contains("\"Alice, A.\""));
        assert!(csv.contains("Room charge: 2 night(s)"));
    }
}
