//! User input validation and email normalization.
//!
//! Pure functions: no I/O, no allocation beyond the report itself.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EMAIL_PATTERN;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";
pub const EMAIL_REQUIRED: &str = "Email is required and must be a string";
pub const EMAIL_INVALID: &str = "Email must be a valid email address";

/// Outcome of validating a candidate user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True iff no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the report, yielding the violations on failure.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validate a candidate `name`/`email` pair.
///
/// `None` stands for "absent or not a string"; an empty email counts as
/// missing. Both rules always run, so an invalid pair reports one or two
/// errors.
pub fn validate_user(name: Option<&str>, email: Option<&str>) -> ValidationReport {
    let mut errors = Vec::new();

    if !name.is_some_and(|n| !n.trim().is_empty()) {
        errors.push(NAME_REQUIRED.to_string());
    }

    match email {
        None | Some("") => errors.push(EMAIL_REQUIRED.to_string()),
        Some(email) if !is_valid_email(email) => errors.push(EMAIL_INVALID.to_string()),
        Some(_) => {}
    }

    ValidationReport { errors }
}

/// Syntactic `local@domain.tld` check. No DNS lookups.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
