//! Department identity and headship types.

use std::fmt::{Display, Formatter};

use collegia_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Department identifier used as the ownership scope for every
/// department-partitioned resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeptId(String);

impl DeptId {
    /// Creates a validated department identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "department id must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > 32 {
            return Err(AppError::Validation(
                "department id must not exceed 32 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DeptId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<DeptId> for String {
    fn from(value: DeptId) -> Self {
        value.0
    }
}

/// Headship record for one department, as shown on the HOD dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HodProfile {
    /// Display name of the head of department.
    pub hod_name: String,
    /// Department administered by this head.
    pub dept_id: DeptId,
    /// Display name of the department.
    pub dept_name: String,
}
