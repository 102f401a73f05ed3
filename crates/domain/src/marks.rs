//! Marks reporting read models.

use collegia_core::{AppError, AppResult};
use serde::Serialize;

/// Assessment slots recognized by the per-student marks pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    /// First internal assessment.
    Assessment1,
    /// Second internal assessment.
    Assessment2,
    /// Continuous assignment component.
    Assignment,
}

impl AssessmentKind {
    /// Returns the storage string used in the `marks` table.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assessment1 => "Assessment 1",
            Self::Assessment2 => "Assessment 2",
            Self::Assignment => "Assignment",
        }
    }

    /// Parses a storage string into an assessment slot.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "Assessment 1" => Ok(Self::Assessment1),
            "Assessment 2" => Ok(Self::Assessment2),
            "Assignment" => Ok(Self::Assignment),
            _ => Err(AppError::Validation(format!(
                "unknown assessment type '{value}'"
            ))),
        }
    }
}

/// One row of the HOD marks report: students joined to the subjects of
/// their department, semester, and track, with any recorded mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkReportRow {
    /// Student roll number.
    pub roll_number: String,
    /// Student display name.
    pub full_name: String,
    /// Subject natural key.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Semester the subject is taught in.
    pub semester: i16,
    /// Program track.
    pub course: String,
    /// Assessment slot, absent when no mark is recorded yet.
    pub assessment_type: Option<String>,
    /// Recorded mark, absent when no mark is recorded yet.
    pub mark: Option<i32>,
}

/// Per-subject pivot of one student's marks across assessment slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentMarksSummary {
    /// Subject natural key.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Mark for the first internal assessment, when recorded.
    pub assessment1: Option<i32>,
    /// Mark for the second internal assessment, when recorded.
    pub assessment2: Option<i32>,
    /// Mark for the assignment component, when recorded.
    pub assignment: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::AssessmentKind;

    #[test]
    fn assessment_storage_strings_round_trip() {
        for kind in [
            AssessmentKind::Assessment1,
            AssessmentKind::Assessment2,
            AssessmentKind::Assignment,
        ] {
            let parsed = AssessmentKind::parse(kind.as_str());
            assert!(parsed.is_ok());
            assert_eq!(parsed.unwrap_or(AssessmentKind::Assignment), kind);
        }
    }

    #[test]
    fn unknown_assessment_type_is_rejected() {
        assert!(AssessmentKind::parse("Quiz").is_err());
    }
}
