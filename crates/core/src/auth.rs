use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Portal role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Portal administrator.
    Admin,
    /// Head of department.
    Hod,
    /// Teaching faculty member.
    Faculty,
    /// Enrolled student.
    Student,
}

impl Role {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hod => "hod",
            Self::Faculty => "faculty",
            Self::Student => "student",
        }
    }

    /// Parses a storage string into a role.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "admin" => Ok(Self::Admin),
            "hod" => Ok(Self::Hod),
            "faculty" => Ok(Self::Faculty),
            "student" => Ok(Self::Student),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// User information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    subject: String,
    role: Role,
}

impl SessionIdentity {
    /// Creates a session identity from a login outcome.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    /// Returns the stable subject id the caller authenticated as.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the role attached to the session.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Ensures the session carries the required role.
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            return Ok(());
        }

        Err(AppError::Unauthorized(format!(
            "this operation requires the '{}' role",
            role.as_str()
        )))
    }
}
