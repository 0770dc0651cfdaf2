//! 时间工具函数
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。财务统计按 UTC 日历切分。

use chrono::{Datelike, NaiveDate};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 当月 1 日 00:00:00 UTC → Unix millis
pub fn month_start_millis(date: NaiveDate) -> i64 {
    let first = date.with_day(1).unwrap_or(date);
    day_start_millis(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(parse_date("06/01/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }

    #[test]
    fn day_window_is_half_open() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let start = day_start_millis(d);
        let end = day_end_millis(d);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn month_start_is_first_of_month() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
        assert_eq!(
            month_start_millis(d),
            day_start_millis(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
    }
}
