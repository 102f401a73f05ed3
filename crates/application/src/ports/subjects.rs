use async_trait::async_trait;

use collegia_core::AppResult;
use collegia_domain::{
    Course, DeptId, FacultyAssignment, FacultyId, FacultyMember, Semester, Subject, SubjectDraft,
    SubjectId,
};

/// Filters for the scoped subject listing. The department-ownership
/// constraint is always part of the query; these only narrow it further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectQuery {
    /// Restrict to one department.
    pub dept_id: Option<DeptId>,
    /// Restrict to one semester.
    pub semester: Option<Semester>,
    /// Program track; callers resolve the configured default before this
    /// query is built.
    pub course: Course,
}

/// Filters for the scoped faculty-assignment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentQuery {
    /// Restrict to one department.
    pub dept_id: Option<DeptId>,
}

/// Repository port for subject rows and their faculty assignments.
///
/// `create_subject` and `update_subject` are transactional: the subject
/// write and the assignment replace happen inside one atomic unit, and
/// any failure rolls back both.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Inserts a subject and, when a faculty id is given, its assignment
    /// row as one atomic unit. Duplicate subject ids yield `Conflict`.
    async fn create_subject(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()>;

    /// Updates a subject matched by `(subject_id, dept_id)` and replaces
    /// its assignment rows as one atomic unit. A zero-row subject update
    /// yields `NotFound`. Existing assignment rows are always removed
    /// before the new one is inserted.
    async fn update_subject(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()>;

    /// Deletes a subject constrained to departments administered by the
    /// given head identity. Returns the number of rows removed; zero
    /// means the subject is absent from the caller's scope.
    async fn delete_subject_scoped(
        &self,
        subject_id: &SubjectId,
        hod_id: &str,
    ) -> AppResult<u64>;

    /// Lists subjects in departments administered by the head identity.
    async fn list_subjects_scoped(
        &self,
        hod_id: &str,
        query: &SubjectQuery,
    ) -> AppResult<Vec<Subject>>;

    /// Lists faculty members in departments administered by the head
    /// identity.
    async fn list_faculty_scoped(
        &self,
        hod_id: &str,
        dept_id: Option<&DeptId>,
    ) -> AppResult<Vec<FacultyMember>>;

    /// Lists faculty assignments for subjects in departments administered
    /// by the head identity.
    async fn list_assignments_scoped(
        &self,
        hod_id: &str,
        query: &AssignmentQuery,
    ) -> AppResult<Vec<FacultyAssignment>>;
}
