//! Email Value Object
//!
//! Basic syntax check only: `local@domain.tld`. Deliverability is not
//! checked.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and validate user input. Surrounding whitespace is trimmed.
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_string();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !is_well_formed(&email) {
            return Err(AppError::bad_request("Invalid email format"));
        }

        if email.split_once('@').is_some_and(|(local, _)| local.len() > LOCAL_PART_MAX_LENGTH) {
            return Err(AppError::bad_request(format!(
                "Local part must be at most {} characters",
                LOCAL_PART_MAX_LENGTH
            )));
        }

        Ok(Self(email))
    }

    /// Wrap a value copied verbatim from another record (an account, a row).
    ///
    /// No validation happens here; stores check [`Email::is_well_formed`]
    /// before persisting.
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Pattern check only, exactly as strict as the storage constraint.
    /// Length limits apply to user input in [`Email::new`].
    pub fn is_well_formed(&self) -> bool {
        is_well_formed(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }

    /// Text before the first `@`, or the whole value when there is none
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(l, _)| l).unwrap_or(&self.0)
    }
}

/// Mirrors the `profiles.email` check constraint:
/// `^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$`
fn is_well_formed(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }

    // Rightmost dot separates the TLD; the host part before it is non-empty.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("jane@example.com").is_ok());
        assert!(Email::new("  jane@example.com ").is_ok());
        assert!(Email::new("jane.doe@example.co.jp").is_ok());
        assert!(Email::new("jane+tag@example.com").is_ok());
        assert!(Email::new("j_d%x-1@mail-relay.example.org").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("jane@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("jane@@example.com").is_err());
        assert!(Email::new("jane@example").is_err());
        assert!(Email::new("jane@example.c").is_err());
        assert!(Email::new("jane doe@example.com").is_err());
    }

    #[test]
    fn test_from_db_is_checked_separately() {
        assert!(!Email::from_db("not-an-email").is_well_formed());
        assert!(Email::from_db("Jane@Example.com").is_well_formed());
    }

    #[test]
    fn test_length_limits_apply_to_input_only() {
        let long_local = format!("{}@example.com", "j".repeat(LOCAL_PART_MAX_LENGTH + 1));
        assert!(Email::new(long_local.as_str()).is_err());
        assert!(Email::from_db(long_local.as_str()).is_well_formed());

        let long_total = format!("jane@{}.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert!(Email::new(long_total.as_str()).is_err());
        assert!(Email::from_db(long_total.as_str()).is_well_formed());
    }

    #[test]
    fn test_parts() {
        let email = Email::new("jane@example.com").unwrap();
        assert_eq!(email.local_part(), "jane");
        assert_eq!(email.domain(), "example.com");

        let raw = Email::from_db("no-at-sign");
        assert_eq!(raw.local_part(), "no-at-sign");
        assert_eq!(raw.domain(), "");
    }
}
