//! Input validation primitives.
//!
//! - Validating non-empty strings
//! - Validating environment variable names
//!
//! These replace verbose ok_or_else + Error::validation_invalid_argument chains.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

fn env_var_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("env var name pattern is valid")
    })
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

pub fn is_env_var_name(name: &str) -> bool {
    env_var_name_pattern().is_match(name)
}

/// Require `name` to be a portable environment variable name.
pub fn require_env_var_name(name: &str) -> Result<&str> {
    if is_env_var_name(name) {
        Ok(name)
    } else {
        Err(Error::config_invalid_value(
            "name",
            Some(name.to_string()),
            "Environment variable names may only contain letters, digits and underscores, and must not start with a digit",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_empty_trims_whitespace() {
        let result = require_non_empty("  preview  ", "target", "msg");
        assert_eq!(result.unwrap(), "preview");
    }

    #[test]
    fn require_non_empty_fails_for_whitespace_only() {
        let result = require_non_empty("   ", "target", "Cannot be empty");
        assert!(result.is_err());
    }

    #[test]
    fn env_var_names_accept_common_forms() {
        assert!(is_env_var_name("NEXT_PUBLIC_FIREBASE_API_KEY"));
        assert!(is_env_var_name("_private"));
        assert!(is_env_var_name("a1"));
    }

    #[test]
    fn env_var_names_reject_shell_syntax() {
        assert!(!is_env_var_name(""));
        assert!(!is_env_var_name("1ABC"));
        assert!(!is_env_var_name("A B"));
        assert!(!is_env_var_name("A;rm"));
        assert!(!is_env_var_name("$(whoami)"));
    }

    #[test]
    fn require_env_var_name_reports_config_error() {
        let err = require_env_var_name("BAD-NAME").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["value"], "BAD-NAME");
    }
}
