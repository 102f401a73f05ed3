use sqlx::QueryBuilder;
use tracing::debug;

use crate::query_scope::push_eq_filter;

use super::*;

impl PostgresSubjectRepository {
    pub(super) async fn list_subjects_scoped_impl(
        &self,
        hod_id: &str,
        query: &SubjectQuery,
    ) -> AppResult<Vec<Subject>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT s.subject_id, s.subject_name, s.dept_id, s.semester, s.course,
                   fs.faculty_id AS assigned_faculty
            FROM subjects s
            LEFT JOIN faculty_subjects fs ON fs.subject_id = s.subject_id
            JOIN department_hod dh ON dh.dept_id = s.dept_id
            WHERE dh.hod_id = "#,
        );
        builder.push_bind(hod_id.to_owned());
        push_eq_filter(&mut builder, "s.course", query.course.as_str().to_owned());

        if let Some(ref dept_id) = query.dept_id {
            push_eq_filter(&mut builder, "s.dept_id", dept_id.as_str().to_owned());
        }
        if let Some(semester) = query.semester {
            push_eq_filter(&mut builder, "s.semester", semester.value());
        }

        builder.push(" ORDER BY s.subject_id");
        debug!(sql = builder.sql(), "scoped subject listing");

        let rows = builder
            .build_query_as::<SubjectRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list subjects for head '{hod_id}': {error}"
                ))
            })?;

        Ok(rows.into_iter().map(Subject::from).collect())
    }

    pub(super) async fn list_faculty_scoped_impl(
        &self,
        hod_id: &str,
        dept_id: Option<&DeptId>,
    ) -> AppResult<Vec<FacultyMember>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT f.faculty_id, f.full_name
            FROM faculty f
            JOIN department_hod dh ON dh.dept_id = f.dept_id
            WHERE dh.hod_id = "#,
        );
        builder.push_bind(hod_id.to_owned());

        if let Some(dept_id) = dept_id {
            push_eq_filter(&mut builder, "f.dept_id", dept_id.as_str().to_owned());
        }

        builder.push(" ORDER BY f.faculty_id");

        let rows = builder
            .build_query_as::<FacultyRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list faculty for head '{hod_id}': {error}"
                ))
            })?;

        Ok(rows.into_iter().map(FacultyMember::from).collect())
    }

    pub(super) async fn list_assignments_scoped_impl(
        &self,
        hod_id: &str,
        query: &AssignmentQuery,
    ) -> AppResult<Vec<FacultyAssignment>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT fs.faculty_id, fs.subject_id, s.subject_name, s.dept_id, s.semester, s.course
            FROM faculty_subjects fs
            JOIN subjects s ON s.subject_id = fs.subject_id
            JOIN department_hod dh ON dh.dept_id = s.dept_id
            WHERE dh.hod_id = "#,
        );
        builder.push_bind(hod_id.to_owned());

        if let Some(ref dept_id) = query.dept_id {
            push_eq_filter(&mut builder, "s.dept_id", dept_id.as_str().to_owned());
        }

        builder.push(" ORDER BY fs.subject_id");

        let rows = builder
            .build_query_as::<AssignmentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list faculty assignments for head '{hod_id}': {error}"
                ))
            })?;

        Ok(rows.into_iter().map(FacultyAssignment::from).collect())
    }
}
