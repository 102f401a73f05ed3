//! PostgreSQL-backed subject repository, including the transactional
//! subject-and-assignment writer.

use async_trait::async_trait;
use sqlx::PgPool;

use collegia_application::{AssignmentQuery, SubjectQuery, SubjectRepository};
use collegia_core::{AppError, AppResult};
use collegia_domain::{
    DeptId, FacultyAssignment, FacultyId, FacultyMember, Subject, SubjectDraft, SubjectId,
};

/// PostgreSQL implementation of the subject repository port.
#[derive(Clone)]
pub struct PostgresSubjectRepository {
    pool: PgPool,
}

impl PostgresSubjectRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubjectRow {
    subject_id: String,
    subject_name: String,
    dept_id: String,
    semester: i16,
    course: String,
    assigned_faculty: Option<String>,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Self {
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            dept_id: row.dept_id,
            semester: row.semester,
            course: row.course,
            assigned_faculty: row.assigned_faculty,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    faculty_id: String,
    subject_id: String,
    subject_name: String,
    dept_id: String,
    semester: i16,
    course: String,
}

impl From<AssignmentRow> for FacultyAssignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            faculty_id: row.faculty_id,
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            dept_id: row.dept_id,
            semester: row.semester,
            course: row.course,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FacultyRow {
    faculty_id: String,
    full_name: String,
}

impl From<FacultyRow> for FacultyMember {
    fn from(row: FacultyRow) -> Self {
        Self {
            faculty_id: row.faculty_id,
            full_name: row.full_name,
        }
    }
}

mod query;
mod write;


#[async_trait]
impl SubjectRepository for PostgresSubjectRepository {
    async fn create_subject(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()> {
        self.create_subject_impl(draft, faculty_id).await
    }

    async fn update_subject(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()> {
        self.update_subject_impl(draft, faculty_id).await
    }

    async fn delete_subject_scoped(
        &self,
        subject_id: &SubjectId,
        hod_id: &str,
    ) -> AppResult<u64> {
        self.delete_subject_scoped_impl(subject_id, hod_id).await
    }

    async fn list_subjects_scoped(
        &self,
        hod_id: &str,
        query: &SubjectQuery,
    ) -> AppResult<Vec<Subject>> {
        self.list_subjects_scoped_impl(hod_id, query).await
    }

    async fn list_faculty_scoped(
        &self,
        hod_id: &str,
        dept_id: Option<&DeptId>,
    ) -> AppResult<Vec<FacultyMember>> {
        self.list_faculty_scoped_impl(hod_id, dept_id).await
    }

    async fn list_assignments_scoped(
        &self,
        hod_id: &str,
        query: &AssignmentQuery,
    ) -> AppResult<Vec<FacultyAssignment>> {
        self.list_assignments_scoped_impl(hod_id, query).await
    }
}

fn subject_conflict_or_internal(error: sqlx::Error, subject_id: &SubjectId) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("subject '{subject_id}' already exists"));
    }

    AppError::Internal(format!("failed to insert subject '{subject_id}': {error}"))
}
