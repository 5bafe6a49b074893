// ABOUTME: Field validation shared by the archive's domain packages
// ABOUTME: Required text, length bounds, and plausible publication years

use thiserror::Error;

/// Earliest publication year accepted for a thesis
pub const MIN_YEAR: i32 = 1900;

/// Latest publication year accepted for a thesis
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Year must be a 4-digit value between 1900 and 2100 (got {0})")]
    InvalidYear(String),

    #[error("{field} contains invalid null bytes")]
    NullByte { field: &'static str },

    #[error("{0}")]
    Invalid(String),
}

/// Trim a required text field and reject it when empty
pub fn require_text(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if trimmed.contains('\0') {
        return Err(ValidationError::NullByte { field });
    }
    Ok(trimmed.to_string())
}

/// Validate character length of an already-trimmed value
pub fn check_length(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validate a year value
pub fn validate_year(year: i32) -> Result<i32, ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ValidationError::InvalidYear(year.to_string()))
    }
}

/// Parse an optional year from form text; blank means "no year"
pub fn parse_year(raw: &str) -> Result<Option<i32>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidYear(trimmed.to_string()))?;
    validate_year(year).map(Some)
}

/// Collapse blank optional text to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("  A Study "), "Title"), Ok("A Study".to_string()));
        assert_eq!(require_text(Some("   "), "Title"), Err(ValidationError::Required("Title")));
        assert_eq!(require_text(None, "Title"), Err(ValidationError::Required("Title")));
        assert!(matches!(
            require_text(Some("bad\0"), "Title"),
            Err(ValidationError::NullByte { .. })
        ));
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("abc", "Username", 3, 255).is_ok());
        assert_eq!(
            check_length("ab", "Username", 3, 255),
            Err(ValidationError::TooShort { field: "Username", min: 3 })
        );
        assert!(check_length(&"x".repeat(256), "Username", 3, 255).is_err());
    }

    #[rstest]
    #[case("2024", Ok(Some(2024)))]
    #[case("", Ok(None))]
    #[case("  ", Ok(None))]
    #[case("null", Ok(None))]
    #[case("1899", Err(ValidationError::InvalidYear("1899".to_string())))]
    #[case("24", Err(ValidationError::InvalidYear("24".to_string())))]
    #[case("twenty", Err(ValidationError::InvalidYear("twenty".to_string())))]
    fn test_parse_year(#[case] raw: &str, #[case] expected: Result<Option<i32>, ValidationError>) {
        assert_eq!(parse_year(raw), expected);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
