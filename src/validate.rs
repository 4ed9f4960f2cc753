// ============================================================================
// VALIDATORS - input checks with user-facing error messages
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Trims the value and rejects it when nothing is left.
pub fn required(value: &str, field: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn email(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Email address is required".to_string());
    }
    if EMAIL_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(format!("\"{}\" is not a valid email address", trimmed))
    }
}

/// Blank optional text becomes `None`.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("  Idea  ", "Title"), Ok("Idea".to_string()));
        assert_eq!(required(" \t ", "Title"), Err("Title is required".to_string()));
    }

    #[test]
    fn email_shapes() {
        assert_eq!(email(" ana@example.com "), Ok("ana@example.com".to_string()));
        assert!(email("ana@example").is_err());
        assert!(email("ana example.com").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn optional_treats_none_as_absent() {
        assert_eq!(optional("None"), None);
        assert_eq!(optional(""), None);
        assert_eq!(optional(" Health "), Some("Health".to_string()));
    }
}
