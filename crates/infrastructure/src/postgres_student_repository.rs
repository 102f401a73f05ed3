//! PostgreSQL-backed student repository: scoped roster writes and the
//! marks reporting reads.

use async_trait::async_trait;
use sqlx::PgPool;

use collegia_application::{MarksQuery, StudentQuery, StudentRepository, StudentRow};
use collegia_core::{AppError, AppResult};
use collegia_domain::{
    MarkReportRow, RollNumber, StudentMarksSummary, StudentProfile, StudentRecord,
};

/// PostgreSQL implementation of the student repository port.
#[derive(Clone)]
pub struct PostgresStudentRepository {
    pool: PgPool,
}

impl PostgresStudentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRecordRow {
    roll_number: String,
    full_name: String,
    email: String,
    dept_id: String,
    semester: i16,
    course: String,
}

impl From<StudentRecordRow> for StudentRecord {
    fn from(row: StudentRecordRow) -> Self {
        Self {
            roll_number: row.roll_number,
            full_name: row.full_name,
            email: row.email,
            dept_id: row.dept_id,
            semester: row.semester,
            course: row.course,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MarkReportRecordRow {
    roll_number: String,
    full_name: String,
    subject_id: String,
    subject_name: String,
    semester: i16,
    course: String,
    assessment_type: Option<String>,
    mark: Option<i32>,
}

impl From<MarkReportRecordRow> for MarkReportRow {
    fn from(row: MarkReportRecordRow) -> Self {
        Self {
            roll_number: row.roll_number,
            full_name: row.full_name,
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            semester: row.semester,
            course: row.course,
            assessment_type: row.assessment_type,
            mark: row.mark,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MarksSummaryRow {
    subject_id: String,
    subject_name: String,
    assessment1: Option<i32>,
    assessment2: Option<i32>,
    assignment: Option<i32>,
}

impl From<MarksSummaryRow> for StudentMarksSummary {
    fn from(row: MarksSummaryRow) -> Self {
        Self {
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            assessment1: row.assessment1,
            assessment2: row.assessment2,
            assignment: row.assignment,
        }
    }
}

mod marks;
mod roster;

#[cfg(test)]
mod tests;

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn insert_student(&self, row: &StudentRow, password_hash: &str) -> AppResult<()> {
        self.insert_student_impl(row, password_hash).await
    }

    async fn update_student(
        &self,
        row: &StudentRow,
        password_hash: Option<&str>,
    ) -> AppResult<u64> {
        self.update_student_impl(row, password_hash).await
    }

    async fn delete_student_scoped(
        &self,
        roll_number: &RollNumber,
        hod_id: &str,
    ) -> AppResult<u64> {
        self.delete_student_scoped_impl(roll_number, hod_id).await
    }

    async fn list_students_scoped(
        &self,
        hod_id: &str,
        query: &StudentQuery,
    ) -> AppResult<Vec<StudentRecord>> {
        self.list_students_scoped_impl(hod_id, query).await
    }

    async fn marks_report_scoped(
        &self,
        hod_id: &str,
        query: &MarksQuery,
    ) -> AppResult<Vec<MarkReportRow>> {
        self.marks_report_scoped_impl(hod_id, query).await
    }

    async fn find_student_profile(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Option<StudentProfile>> {
        self.find_student_profile_impl(roll_number).await
    }

    async fn marks_summary_for_student(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Vec<StudentMarksSummary>> {
        self.marks_summary_for_student_impl(roll_number).await
    }
}

fn student_conflict_or_internal(error: sqlx::Error, roll_number: &RollNumber) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("student '{roll_number}' already exists"));
    }

    AppError::Internal(format!("failed to insert student '{roll_number}': {error}"))
}
