use async_trait::async_trait;

use collegia_core::AppResult;
use collegia_domain::{
    Course, DeptId, EmailAddress, MarkReportRow, RollNumber, Semester, StudentMarksSummary,
    StudentProfile, StudentRecord, SubjectId,
};

/// Validated student fields written by the roster statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    /// Student roll number.
    pub roll_number: RollNumber,
    /// Student display name.
    pub full_name: String,
    /// Student contact email.
    pub email: EmailAddress,
    /// Department the student is enrolled in.
    pub dept_id: DeptId,
    /// Current semester.
    pub semester: Semester,
    /// Program track.
    pub course: Course,
}

/// Filters for the scoped student roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentQuery {
    /// Restrict to one department.
    pub dept_id: Option<DeptId>,
    /// Restrict to one semester.
    pub semester: Option<Semester>,
    /// Program track; callers resolve the configured default before this
    /// query is built.
    pub course: Course,
}

/// Filters for the HOD marks report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarksQuery {
    /// Restrict to one department.
    pub dept_id: Option<DeptId>,
    /// Restrict to one semester.
    pub semester: Option<Semester>,
    /// Restrict to one subject.
    pub subject_id: Option<SubjectId>,
    /// Program track; callers resolve the configured default before this
    /// query is built.
    pub course: Course,
}

/// Repository port for student roster rows and marks reads.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a student row. Duplicate roll numbers yield `Conflict`.
    async fn insert_student(&self, row: &StudentRow, password_hash: &str) -> AppResult<()>;

    /// Updates a student row matched by `(roll_number, dept_id)`. The
    /// password column is only rewritten when a new hash is supplied.
    /// Returns the number of rows updated.
    async fn update_student(
        &self,
        row: &StudentRow,
        password_hash: Option<&str>,
    ) -> AppResult<u64>;

    /// Deletes a student constrained to departments administered by the
    /// given head identity. Returns the number of rows removed.
    async fn delete_student_scoped(
        &self,
        roll_number: &RollNumber,
        hod_id: &str,
    ) -> AppResult<u64>;

    /// Lists students in departments administered by the head identity.
    async fn list_students_scoped(
        &self,
        hod_id: &str,
        query: &StudentQuery,
    ) -> AppResult<Vec<StudentRecord>>;

    /// Builds the wide students-subjects-marks report scoped to
    /// departments administered by the head identity.
    async fn marks_report_scoped(
        &self,
        hod_id: &str,
        query: &MarksQuery,
    ) -> AppResult<Vec<MarkReportRow>>;

    /// Returns the self-service profile for one student.
    async fn find_student_profile(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Option<StudentProfile>>;

    /// Pivots one student's marks across the assessment slots of the
    /// subjects in their department, track, and semester.
    async fn marks_summary_for_student(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Vec<StudentMarksSummary>>;
}
