//! Student identity and roster types.

use std::fmt::{Display, Formatter};

use collegia_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Student roll number (a natural key such as `21CS042`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollNumber(String);

impl RollNumber {
    /// Creates a validated roll number.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "roll number must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > 32 {
            return Err(AppError::Validation(
                "roll number must not exceed 32 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying roll number string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RollNumber {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs structural validation only: non-empty, exactly one `@`,
    /// non-empty local part, domain with at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return Err(AppError::Validation(
                "email address must have a local part and exactly one '@'".to_owned(),
            ));
        }

        if parts[1].is_empty() || !parts[1].contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Student roster row scoped to the caller's departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    /// Student roll number.
    pub roll_number: String,
    /// Student display name.
    pub full_name: String,
    /// Student contact email.
    pub email: String,
    /// Department the student is enrolled in.
    pub dept_id: String,
    /// Current semester.
    pub semester: i16,
    /// Program track.
    pub course: String,
}

/// Student self-service profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentProfile {
    /// Student display name.
    pub full_name: String,
    /// Student roll number.
    pub roll_number: String,
    /// Display name of the student's department.
    pub dept_name: String,
}

#[cfg(test)]
mod tests {
    use super::{EmailAddress, RollNumber};

    #[test]
    fn roll_number_trims_and_keeps_value() {
        let roll = RollNumber::new(" 21CS042 ");
        assert!(roll.is_ok());
        assert_eq!(roll.unwrap_or_else(|_| unreachable!()).as_str(), "21CS042");
    }

    #[test]
    fn blank_roll_number_is_rejected() {
        assert!(RollNumber::new("").is_err());
    }

    #[test]
    fn valid_email_is_lowercased() {
        let email = EmailAddress::new("Jane@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| unreachable!()).as_str(),
            "jane@example.com"
        );
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("jane@nodot").is_err());
    }

    #[test]
    fn email_without_local_part_is_rejected() {
        assert!(EmailAddress::new("@example.com").is_err());
    }
}
