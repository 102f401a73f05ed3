//! Subject and faculty-assignment types.

use std::fmt::{Display, Formatter};

use collegia_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::DeptId;

/// Subject identifier (a natural key such as `CS101`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a validated subject identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "subject id must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > 32 {
            return Err(AppError::Validation(
                "subject id must not exceed 32 characters".to_owned(),
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

impl Display for SubjectId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Faculty member identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacultyId(String);

impl FacultyId {
    /// Creates a validated faculty identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "faculty id must not be empty".to_owned(),
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

impl Display for FacultyId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Program track a subject or student belongs to (for example `B.Tech`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Course(String);

impl Course {
    /// Creates a validated course track name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "course must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying track name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Course {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Highest semester number accepted by the portal.
pub const SEMESTER_MAX: i16 = 12;

/// Semester ordinal within a program track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Semester(i16);

impl Semester {
    /// Creates a validated semester ordinal.
    pub fn new(value: i16) -> AppResult<Self> {
        if !(1..=SEMESTER_MAX).contains(&value) {
            return Err(AppError::Validation(format!(
                "semester must be between 1 and {SEMESTER_MAX}, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the ordinal value.
    #[must_use]
    pub fn value(&self) -> i16 {
        self.0
    }
}

impl Display for Semester {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated subject fields accepted by the transactional writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    /// Subject natural key.
    pub subject_id: SubjectId,
    /// Subject display name.
    pub subject_name: NonEmptyString,
    /// Owning department.
    pub dept_id: DeptId,
    /// Semester the subject is taught in.
    pub semester: Semester,
    /// Program track the subject belongs to.
    pub course: Course,
}

/// Subject row as read back for the HOD dashboard, including the
/// currently assigned faculty member when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Subject natural key.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Owning department.
    pub dept_id: String,
    /// Semester the subject is taught in.
    pub semester: i16,
    /// Program track the subject belongs to.
    pub course: String,
    /// Faculty member currently assigned, if any.
    pub assigned_faculty: Option<String>,
}

/// A faculty-to-subject assignment row joined with its subject fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyAssignment {
    /// Assigned faculty member.
    pub faculty_id: String,
    /// Assigned subject.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Department owning the subject.
    pub dept_id: String,
    /// Semester the subject is taught in.
    pub semester: i16,
    /// Program track the subject belongs to.
    pub course: String,
}

/// Faculty roster entry scoped to the caller's departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyMember {
    /// Faculty member identifier.
    pub faculty_id: String,
    /// Faculty member display name.
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{Course, Semester, SubjectId, SEMESTER_MAX};

    #[test]
    fn subject_id_rejects_blank_input() {
        assert!(SubjectId::new("").is_err());
        assert!(SubjectId::new("  ").is_err());
    }

    #[test]
    fn semester_bounds_are_enforced() {
        assert!(Semester::new(0).is_err());
        assert!(Semester::new(SEMESTER_MAX + 1).is_err());
        assert!(Semester::new(1).is_ok());
        assert!(Semester::new(SEMESTER_MAX).is_ok());
    }

    #[test]
    fn course_keeps_trimmed_track_name() {
        let course = Course::new(" B.Tech ");
        assert!(course.is_ok());
        assert_eq!(course.unwrap_or_else(|_| unreachable!()).as_str(), "B.Tech");
    }

    proptest! {
        #[test]
        fn semester_accepts_exactly_the_valid_range(value in -100i16..100) {
            let result = Semester::new(value);
            prop_assert_eq!(result.is_ok(), (1..=SEMESTER_MAX).contains(&value));
        }

        #[test]
        fn subject_id_round_trips_trimmed_tokens(token in "[A-Z]{2,4}[0-9]{2,3}") {
            let subject_id = SubjectId::new(format!(" {token} "));
            prop_assert!(subject_id.is_ok());
            let subject_id = subject_id.unwrap_or_else(|_| unreachable!());
            prop_assert_eq!(
                subject_id.as_str(),
                token
            );
        }
    }
}
