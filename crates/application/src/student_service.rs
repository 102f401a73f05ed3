//! Student mutation guard, scoped roster reads, and self-service reads.

use std::sync::Arc;

use collegia_core::{AppError, AppResult, NonEmptyString, Role, SessionIdentity};
use collegia_domain::{
    Course, DeptId, EmailAddress, MarkReportRow, RollNumber, Semester, StudentMarksSummary,
    StudentProfile, StudentRecord, SubjectId,
};

use crate::ports::{
    DepartmentDirectory, MarksQuery, PasswordHasher, StudentQuery, StudentRepository, StudentRow,
};

/// Validated student fields accepted by the mutation entry points.
///
/// `password` is required when creating a student and optional on
/// update, where an absent password leaves the stored hash untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentParams {
    /// Student roll number.
    pub roll_number: RollNumber,
    /// Student display name.
    pub full_name: NonEmptyString,
    /// Student contact email.
    pub email: EmailAddress,
    /// Plaintext password to hash and store, when supplied.
    pub password: Option<String>,
    /// Department the student is enrolled in; must be administered by
    /// the actor.
    pub dept_id: DeptId,
    /// Current semester.
    pub semester: Semester,
    /// Program track, when the caller supplied one.
    pub course: Option<Course>,
}

/// Application service guarding student roster mutations behind role and
/// department-ownership checks, and serving scoped roster and marks
/// reads.
#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    directory: Arc<dyn DepartmentDirectory>,
    password_hasher: Arc<dyn PasswordHasher>,
    default_course: Course,
}

impl StudentService {
    /// Creates the service from repository implementations, the password
    /// hasher, and the configured default program track.
    #[must_use]
    pub fn new(
        students: Arc<dyn StudentRepository>,
        directory: Arc<dyn DepartmentDirectory>,
        password_hasher: Arc<dyn PasswordHasher>,
        default_course: Course,
    ) -> Self {
        Self {
            students,
            directory,
            password_hasher,
            default_course,
        }
    }

    /// Enrolls a student into the actor's department.
    pub async fn add_student(
        &self,
        actor: &SessionIdentity,
        params: StudentParams,
    ) -> AppResult<()> {
        self.require_department_ownership(actor, &params.dept_id)
            .await?;

        let Some(ref password) = params.password else {
            return Err(AppError::Validation(
                "a password is required when enrolling a student".to_owned(),
            ));
        };

        let password_hash = self.password_hasher.hash_password(password)?;
        let row = self.row_from(params);
        self.students.insert_student(&row, &password_hash).await
    }

    /// Updates a student row in the actor's department. The stored
    /// password is only rewritten when a new one is supplied.
    pub async fn update_student(
        &self,
        actor: &SessionIdentity,
        params: StudentParams,
    ) -> AppResult<()> {
        self.require_department_ownership(actor, &params.dept_id)
            .await?;

        let password_hash = params
            .password
            .as_deref()
            .map(|password| self.password_hasher.hash_password(password))
            .transpose()?;
        let row = self.row_from(params);

        let updated = self
            .students
            .update_student(&row, password_hash.as_deref())
            .await?;

        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "student '{}' does not exist in department '{}'",
                row.roll_number, row.dept_id
            )));
        }

        Ok(())
    }

    /// Removes a student. Ownership is enforced by the query shape: a
    /// delete that matches zero rows is an authorization failure.
    pub async fn delete_student(
        &self,
        actor: &SessionIdentity,
        roll_number: &RollNumber,
    ) -> AppResult<()> {
        actor.require_role(Role::Hod)?;

        let removed = self
            .students
            .delete_student_scoped(roll_number, actor.subject())
            .await?;

        if removed == 0 {
            return Err(AppError::Forbidden(format!(
                "student '{roll_number}' is not administered by '{}'",
                actor.subject()
            )));
        }

        Ok(())
    }

    /// Lists students in the actor's departments, with optional filters.
    pub async fn list_students(
        &self,
        actor: &SessionIdentity,
        dept_id: Option<DeptId>,
        semester: Option<Semester>,
        course: Option<Course>,
    ) -> AppResult<Vec<StudentRecord>> {
        actor.require_role(Role::Hod)?;

        let query = StudentQuery {
            dept_id,
            semester,
            course: course.unwrap_or_else(|| self.default_course.clone()),
        };
        self.students
            .list_students_scoped(actor.subject(), &query)
            .await
    }

    /// Builds the marks report for the actor's departments.
    pub async fn marks_report(
        &self,
        actor: &SessionIdentity,
        dept_id: Option<DeptId>,
        semester: Option<Semester>,
        course: Option<Course>,
        subject_id: Option<SubjectId>,
    ) -> AppResult<Vec<MarkReportRow>> {
        actor.require_role(Role::Hod)?;

        let query = MarksQuery {
            dept_id,
            semester,
            subject_id,
            course: course.unwrap_or_else(|| self.default_course.clone()),
        };
        self.students
            .marks_report_scoped(actor.subject(), &query)
            .await
    }

    /// Returns the profile of the student the session belongs to.
    pub async fn student_profile(&self, actor: &SessionIdentity) -> AppResult<StudentProfile> {
        actor.require_role(Role::Student)?;

        let roll_number = RollNumber::new(actor.subject())?;
        self.students
            .find_student_profile(&roll_number)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no student record exists for '{}'",
                    actor.subject()
                ))
            })
    }

    /// Returns the marks pivot for the student the session belongs to.
    /// The requested roll number must match the session subject.
    pub async fn student_marks(
        &self,
        actor: &SessionIdentity,
        requested_roll: &str,
    ) -> AppResult<Vec<StudentMarksSummary>> {
        actor.require_role(Role::Student)?;

        if requested_roll != actor.subject() {
            return Err(AppError::Unauthorized(
                "students may only read their own marks".to_owned(),
            ));
        }

        let roll_number = RollNumber::new(requested_roll)?;
        self.students.marks_summary_for_student(&roll_number).await
    }

    async fn require_department_ownership(
        &self,
        actor: &SessionIdentity,
        target: &DeptId,
    ) -> AppResult<()> {
        actor.require_role(Role::Hod)?;

        let owned = self
            .directory
            .resolve_owned_dept(actor.subject())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no department is registered for '{}'",
                    actor.subject()
                ))
            })?;

        if owned != *target {
            return Err(AppError::Forbidden(format!(
                "'{}' does not administer department '{target}'",
                actor.subject()
            )));
        }

        Ok(())
    }

    fn row_from(&self, params: StudentParams) -> StudentRow {
        StudentRow {
            roll_number: params.roll_number,
            full_name: String::from(params.full_name),
            email: params.email,
            dept_id: params.dept_id,
            semester: params.semester,
            course: params
                .course
                .unwrap_or_else(|| self.default_course.clone()),
        }
    }
}
