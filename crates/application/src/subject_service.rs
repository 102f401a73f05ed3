//! Subject mutation guard and scoped subject reads.

use std::sync::Arc;

use collegia_core::{AppError, AppResult, NonEmptyString, Role, SessionIdentity};
use collegia_domain::{
    Course, DeptId, FacultyAssignment, FacultyId, FacultyMember, HodProfile, Semester, Subject,
    SubjectDraft, SubjectId,
};

use crate::ports::{AssignmentQuery, DepartmentDirectory, SubjectQuery, SubjectRepository};

/// Validated subject fields accepted by the mutation entry points.
///
/// `course` is optional; the service substitutes the configured default
/// track when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectParams {
    /// Subject natural key.
    pub subject_id: SubjectId,
    /// Subject display name.
    pub subject_name: NonEmptyString,
    /// Department the subject belongs to; must be administered by the actor.
    pub dept_id: DeptId,
    /// Semester the subject is taught in.
    pub semester: Semester,
    /// Program track, when the caller supplied one.
    pub course: Option<Course>,
    /// Faculty member to assign, when the caller supplied one.
    pub faculty_id: Option<FacultyId>,
}

/// Application service guarding every subject mutation behind role and
/// department-ownership checks before delegating to the transactional
/// repository writer.
#[derive(Clone)]
pub struct SubjectService {
    subjects: Arc<dyn SubjectRepository>,
    directory: Arc<dyn DepartmentDirectory>,
    default_course: Course,
}

impl SubjectService {
    /// Creates the service from repository implementations and the
    /// configured default program track.
    #[must_use]
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        directory: Arc<dyn DepartmentDirectory>,
        default_course: Course,
    ) -> Self {
        Self {
            subjects,
            directory,
            default_course,
        }
    }

    /// Returns the headship profile for the acting head of department.
    pub async fn hod_profile(&self, actor: &SessionIdentity) -> AppResult<HodProfile> {
        actor.require_role(Role::Hod)?;

        self.directory
            .find_hod_profile(actor.subject())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no headship record exists for '{}'",
                    actor.subject()
                ))
            })
    }

    /// Creates a subject, with its faculty assignment when one is given,
    /// inside the repository's atomic unit of work.
    pub async fn add_subject(
        &self,
        actor: &SessionIdentity,
        params: SubjectParams,
    ) -> AppResult<()> {
        self.require_department_ownership(actor, &params.dept_id)
            .await?;

        let (draft, faculty_id) = self.draft_from(params);
        self.subjects
            .create_subject(&draft, faculty_id.as_ref())
            .await
    }

    /// Updates a subject and replaces its faculty assignment inside the
    /// repository's atomic unit of work.
    pub async fn update_subject(
        &self,
        actor: &SessionIdentity,
        params: SubjectParams,
    ) -> AppResult<()> {
        self.require_department_ownership(actor, &params.dept_id)
            .await?;

        let (draft, faculty_id) = self.draft_from(params);
        self.subjects
            .update_subject(&draft, faculty_id.as_ref())
            .await
    }

    /// Deletes a subject. Ownership is enforced by the query shape: a
    /// delete that matches zero rows is an authorization failure, not an
    /// empty success.
    pub async fn delete_subject(
        &self,
        actor: &SessionIdentity,
        subject_id: &SubjectId,
    ) -> AppResult<()> {
        actor.require_role(Role::Hod)?;

        let removed = self
            .subjects
            .delete_subject_scoped(subject_id, actor.subject())
            .await?;

        if removed == 0 {
            return Err(AppError::Forbidden(format!(
                "subject '{subject_id}' is not administered by '{}'",
                actor.subject()
            )));
        }

        Ok(())
    }

    /// Lists subjects in the actor's departments, with optional filters.
    pub async fn list_subjects(
        &self,
        actor: &SessionIdentity,
        dept_id: Option<DeptId>,
        semester: Option<Semester>,
        course: Option<Course>,
    ) -> AppResult<Vec<Subject>> {
        actor.require_role(Role::Hod)?;

        let query = SubjectQuery {
            dept_id,
            semester,
            course: course.unwrap_or_else(|| self.default_course.clone()),
        };
        self.subjects
            .list_subjects_scoped(actor.subject(), &query)
            .await
    }

    /// Lists faculty members in the actor's departments.
    pub async fn list_faculty(
        &self,
        actor: &SessionIdentity,
        dept_id: Option<DeptId>,
    ) -> AppResult<Vec<FacultyMember>> {
        actor.require_role(Role::Hod)?;

        self.subjects
            .list_faculty_scoped(actor.subject(), dept_id.as_ref())
            .await
    }

    /// Lists faculty assignments for subjects in the actor's departments.
    pub async fn list_faculty_assignments(
        &self,
        actor: &SessionIdentity,
        dept_id: Option<DeptId>,
    ) -> AppResult<Vec<FacultyAssignment>> {
        actor.require_role(Role::Hod)?;

        let query = AssignmentQuery { dept_id };
        self.subjects
            .list_assignments_scoped(actor.subject(), &query)
            .await
    }

    /// Resolves the department the actor administers, before any write.
    async fn resolve_owned_dept(&self, actor: &SessionIdentity) -> AppResult<DeptId> {
        actor.require_role(Role::Hod)?;

        self.directory
            .resolve_owned_dept(actor.subject())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no department is registered for '{}'",
                    actor.subject()
                ))
            })
    }

    async fn require_department_ownership(
        &self,
        actor: &SessionIdentity,
        target: &DeptId,
    ) -> AppResult<()> {
        let owned = self.resolve_owned_dept(actor).await?;

        if owned != *target {
            return Err(AppError::Forbidden(format!(
                "'{}' does not administer department '{target}'",
                actor.subject()
            )));
        }

        Ok(())
    }

    fn draft_from(&self, params: SubjectParams) -> (SubjectDraft, Option<FacultyId>) {
        let draft = SubjectDraft {
            subject_id: params.subject_id,
            subject_name: params.subject_name,
            dept_id: params.dept_id,
            semester: params.semester,
            course: params
                .course
                .unwrap_or_else(|| self.default_course.clone()),
        };

        (draft, params.faculty_id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use collegia_core::{AppError, AppResult, NonEmptyString, Role, SessionIdentity};
    use collegia_domain::{
        Course, DeptId, FacultyAssignment, FacultyId, FacultyMember, HodProfile, Semester,
        Subject, SubjectDraft, SubjectId,
    };
    use tokio::sync::Mutex;

    use crate::ports::{AssignmentQuery, DepartmentDirectory, SubjectQuery, SubjectRepository};

    use super::{SubjectParams, SubjectService};

    struct FakeDirectory {
        owned: Option<DeptId>,
    }

    #[async_trait]
    impl DepartmentDirectory for FakeDirectory {
        async fn resolve_owned_dept(&self, _hod_id: &str) -> AppResult<Option<DeptId>> {
            Ok(self.owned.clone())
        }

        async fn find_hod_profile(&self, hod_id: &str) -> AppResult<Option<HodProfile>> {
            Ok(self.owned.clone().map(|dept_id| HodProfile {
                hod_name: format!("Head {hod_id}"),
                dept_name: format!("Dept {dept_id}"),
                dept_id,
            }))
        }
    }

    #[derive(Default)]
    struct FakeSubjectRepository {
        created: Mutex<Vec<(SubjectDraft, Option<FacultyId>)>>,
        updated: Mutex<Vec<(SubjectDraft, Option<FacultyId>)>>,
        listed: Mutex<Vec<SubjectQuery>>,
        delete_removes: u64,
    }

    #[async_trait]
    impl SubjectRepository for FakeSubjectRepository {
        async fn create_subject(
            &self,
            draft: &SubjectDraft,
            faculty_id: Option<&FacultyId>,
        ) -> AppResult<()> {
            self.created
                .lock()
                .await
                .push((draft.clone(), faculty_id.cloned()));
            Ok(())
        }

        async fn update_subject(
            &self,
            draft: &SubjectDraft,
            faculty_id: Option<&FacultyId>,
        ) -> AppResult<()> {
            self.updated
                .lock()
                .await
                .push((draft.clone(), faculty_id.cloned()));
            Ok(())
        }

        async fn delete_subject_scoped(
            &self,
            _subject_id: &SubjectId,
            _hod_id: &str,
        ) -> AppResult<u64> {
            Ok(self.delete_removes)
        }

        async fn list_subjects_scoped(
            &self,
            _hod_id: &str,
            query: &SubjectQuery,
        ) -> AppResult<Vec<Subject>> {
            self.listed.lock().await.push(query.clone());
            Ok(Vec::new())
        }

        async fn list_faculty_scoped(
            &self,
            _hod_id: &str,
            _dept_id: Option<&DeptId>,
        ) -> AppResult<Vec<FacultyMember>> {
            Ok(Vec::new())
        }

        async fn list_assignments_scoped(
            &self,
            _hod_id: &str,
            _query: &AssignmentQuery,
        ) -> AppResult<Vec<FacultyAssignment>> {
            Ok(Vec::new())
        }
    }

    fn dept(value: &str) -> DeptId {
        DeptId::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn params(dept_id: &str, faculty: Option<&str>) -> SubjectParams {
        SubjectParams {
            subject_id: SubjectId::new("CS101").unwrap_or_else(|_| unreachable!()),
            subject_name: NonEmptyString::new("Algorithms").unwrap_or_else(|_| unreachable!()),
            dept_id: dept(dept_id),
            semester: Semester::new(3).unwrap_or_else(|_| unreachable!()),
            course: None,
            faculty_id: faculty
                .map(|value| FacultyId::new(value).unwrap_or_else(|_| unreachable!())),
        }
    }

    fn service(
        repository: Arc<FakeSubjectRepository>,
        owned: Option<&str>,
    ) -> SubjectService {
        SubjectService::new(
            repository,
            Arc::new(FakeDirectory {
                owned: owned.map(dept),
            }),
            Course::new("B.Tech").unwrap_or_else(|_| unreachable!()),
        )
    }

    #[tokio::test]
    async fn add_subject_rejects_non_hod_sessions() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), Some("D1"));
        let actor = SessionIdentity::new("S1", Role::Student);

        let result = service.add_subject(&actor, params("D1", None)).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(repository.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn add_subject_rejects_heads_without_a_department() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), None);
        let actor = SessionIdentity::new("H1", Role::Hod);

        let result = service.add_subject(&actor, params("D1", None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repository.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn add_subject_rejects_foreign_departments() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);

        let result = service.add_subject(&actor, params("D2", Some("F1"))).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(repository.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn add_subject_fills_default_course_and_forwards_faculty() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);

        let result = service.add_subject(&actor, params("D1", Some("F1"))).await;
        assert!(result.is_ok());

        let created = repository.created.lock().await;
        assert_eq!(created.len(), 1);
        let (draft, faculty_id) = &created[0];
        assert_eq!(draft.course.as_str(), "B.Tech");
        assert_eq!(
            faculty_id.as_ref().map(|value| value.as_str()),
            Some("F1")
        );
    }

    #[tokio::test]
    async fn update_subject_rejects_foreign_departments() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);

        let result = service
            .update_subject(&actor, params("D2", Some("F2")))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(repository.updated.lock().await.is_empty());
    }

    #[tokio::test]
    async fn delete_subject_maps_zero_rows_to_forbidden() {
        let repository = Arc::new(FakeSubjectRepository {
            delete_removes: 0,
            ..FakeSubjectRepository::default()
        });
        let service = service(repository, Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);
        let subject_id = SubjectId::new("CS900").unwrap_or_else(|_| unreachable!());

        let result = service.delete_subject(&actor, &subject_id).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_subject_succeeds_when_a_row_was_removed() {
        let repository = Arc::new(FakeSubjectRepository {
            delete_removes: 1,
            ..FakeSubjectRepository::default()
        });
        let service = service(repository, Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);
        let subject_id = SubjectId::new("CS101").unwrap_or_else(|_| unreachable!());

        let result = service.delete_subject(&actor, &subject_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_subjects_applies_the_default_course() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository.clone(), Some("D1"));
        let actor = SessionIdentity::new("H1", Role::Hod);

        let result = service.list_subjects(&actor, Some(dept("D1")), None, None).await;
        assert!(result.is_ok());

        let listed = repository.listed.lock().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course.as_str(), "B.Tech");
        assert_eq!(
            listed[0].dept_id.as_ref().map(|value| value.as_str()),
            Some("D1")
        );
    }

    #[tokio::test]
    async fn hod_profile_requires_a_headship_record() {
        let repository = Arc::new(FakeSubjectRepository::default());
        let service = service(repository, None);
        let actor = SessionIdentity::new("H9", Role::Hod);

        let result = service.hod_profile(&actor).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
