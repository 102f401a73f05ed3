//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod department;
mod marks;
mod student;
mod subject;

pub use department::{DeptId, HodProfile};
pub use marks::{AssessmentKind, MarkReportRow, StudentMarksSummary};
pub use student::{EmailAddress, RollNumber, StudentProfile, StudentRecord};
pub use subject::{
    Course, FacultyAssignment, FacultyId, FacultyMember, Semester, Subject, SubjectDraft,
    SubjectId, SEMESTER_MAX,
};
