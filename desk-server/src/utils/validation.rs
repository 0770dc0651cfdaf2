//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names, contacts, descriptions
//! - SQLite TEXT has no built-in length enforcement

use chrono::NaiveDate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: guest name, room type, username, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, chat messages
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, contact
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Chat prompt length cap
pub const MAX_CHAT_PROMPT_LEN: usize = 2000;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a money amount is finite and non-negative
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

// ── National ID validation ──────────────────────────────────────────

/// GB 11643 check-digit weights for the first 17 digits
const ID_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
/// Check-digit alphabet indexed by weighted sum mod 11
const ID_CHECK_CHARS: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Validate an 18-character national ID number: region prefix, embedded
/// birth date, and the mod-11 check digit.
pub fn validate_id_card(id_card: &str) -> Result<(), AppError> {
    let chars: Vec<char> = id_card.chars().collect();
    if chars.len() != 18 {
        return Err(AppError::validation(
            "id_card must be exactly 18 characters",
        ));
    }
    if chars[0] == '0' {
        return Err(AppError::validation("id_card region code cannot start with 0"));
    }

    let mut sum: u32 = 0;
    for (i, c) in chars[..17].iter().enumerate() {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| AppError::validation("id_card must start with 17 digits"))?;
        sum += digit * ID_WEIGHTS[i];
    }

    // Birth date occupies positions 6..14 as YYYYMMDD
    let birth: String = chars[6..14].iter().collect();
    let birth_date = NaiveDate::parse_from_str(&birth, "%Y%m%d")
        .map_err(|_| AppError::validation(format!("id_card birth date {birth} is not a valid date")))?;
    let year = birth[..4]
        .parse::<i32>()
        .map_err(|_| AppError::validation("id_card birth year is malformed"))?;
    if !(1800..=2100).contains(&year) || birth_date > chrono::Utc::now().date_naive() {
        return Err(AppError::validation(format!(
            "id_card birth date {birth} is out of range"
        )));
    }

    let expected = ID_CHECK_CHARS[(sum % 11) as usize];
    let last = chars[17].to_ascii_uppercase();
    if last != expected {
        return Err(AppError::validation(format!(
            "id_card check digit mismatch (expected {expected})"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_id_card() {
        // 11010519491231002X is the canonical GB 11643 example number
        assert!(validate_id_card("11010519491231002X").is_ok());
        assert!(validate_id_card("11010519491231002x").is_ok());
    }

    #[test]
    fn rejects_bad_check_digit() {
        assert!(validate_id_card("110105194912310021").is_err());
    }

    #[test]
    fn rejects_bad_length_and_characters() {
        assert!(validate_id_card("1234").is_err());
        assert!(validate_id_card("1101051949123100XX").is_err());
        assert!(validate_id_card("01010519491231002X").is_err());
    }

    #[test]
    fn rejects_impossible_birth_date() {
        // Month 13
        assert!(validate_id_card("110105194913310029").is_err());
    }

    #[test]
    fn required_text_limits() {
        assert!(validate_required_text("lobby", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn amount_must_be_finite_and_non_negative() {
        assert!(validate_amount(10.0, "amount").is_ok());
        assert!(validate_amount(-0.01, "amount").is_err());
        assert!(validate_amount(f64::NAN, "amount").is_err());
    }
}
