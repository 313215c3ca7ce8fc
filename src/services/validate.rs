//! Field-level validation shared by every resource component.
//!
//! Cross-reference checks (does this author id name an existing
//! person?) are not here: they belong to the owning component, which
//! performs them by calling the sibling component's read operation.

use chrono::{DateTime, Utc};

use super::ResourceError;

pub const MIN_PASSWORD_LEN: usize = 5;

pub fn non_empty(field: &'static str, value: &str) -> Result<(), ResourceError> {
    if value.is_empty() {
        return Err(ResourceError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

pub fn password_length(password: &str) -> Result<(), ResourceError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ResourceError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn past_only(field: &'static str, value: DateTime<Utc>) -> Result<(), ResourceError> {
    if value > Utc::now() {
        return Err(ResourceError::validation(format!(
            "{field} must be from the past. Actual value: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_non_empty() {
        assert!(non_empty("name", "general").is_ok());
        assert!(non_empty("name", "").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(password_length("12345").is_ok());
        assert!(password_length("1234").is_err());
        assert!(password_length("").is_err());
    }

    #[test]
    fn test_past_only() {
        assert!(past_only("created", Utc::now() - Duration::minutes(1)).is_ok());
        assert!(past_only("created", Utc::now() + Duration::minutes(5)).is_err());
    }

    #[test]
    fn test_validation_kind() {
        let err = password_length("x").unwrap_err();
        assert_eq!(err.kind(), "validation");
    }
}
