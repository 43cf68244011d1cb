//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits follow the original database schema: table labels are short
//! identifiers, names fit a single receipt line, notes stay bounded.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, menu item, customer name
pub const MAX_NAME_LEN: usize = 100;

/// Table labels ("12", "Terrace 3", ...)
pub const MAX_TABLE_LABEL_LEN: usize = 20;

/// Notes, special instructions, feedback comments
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
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
        return Err(AppError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("12", "table_label", MAX_TABLE_LABEL_LEN).is_ok());
        assert!(validate_required_text("  ", "table_label", MAX_TABLE_LABEL_LEN).is_err());
        let long = "x".repeat(MAX_TABLE_LABEL_LEN + 1);
        assert!(validate_required_text(&long, "table_label", MAX_TABLE_LABEL_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_none() {
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "note", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "note", MAX_NOTE_LEN).is_err());
    }
}
