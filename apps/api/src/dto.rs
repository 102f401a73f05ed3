//! Request and response payloads.
//!
//! Request bodies and query strings use the camelCase field names the
//! portal frontend sends; responses keep the snake_case row shape of the
//! underlying tables.

mod auth;
mod hod;
mod student;

pub use auth::{IdentityResponse, LoginRequest, LoginResponse, RegisterAdminRequest};
pub use hod::{
    AssignmentListQuery, DeleteStudentQuery, DeleteSubjectQuery, MarksReportQuery,
    ScopedListQuery, StudentPayload, SubjectPayload,
};
pub use student::StudentMarksQuery;

use collegia_core::{AppError, AppResult};

/// Validates that every required field was present, reporting all the
/// missing ones in a single error.
pub(crate) fn require_fields(fields: &[(&str, bool)]) -> AppResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "missing required fields: {}",
        missing.join(", ")
    )))
}

/// Treats absent and blank transport strings alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
