use sqlx::QueryBuilder;
use tracing::debug;

use crate::query_scope::push_eq_filter;

use super::*;

impl PostgresStudentRepository {
    pub(super) async fn marks_report_scoped_impl(
        &self,
        hod_id: &str,
        query: &MarksQuery,
    ) -> AppResult<Vec<MarkReportRow>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT s.roll_number, s.full_name, sub.subject_id, sub.subject_name,
                   sub.semester, sub.course, m.assessment_type, m.mark
            FROM students s
            JOIN subjects sub
              ON sub.dept_id = s.dept_id
             AND sub.semester = s.semester
             AND sub.course = s.course
            JOIN department_hod dh ON dh.dept_id = s.dept_id
            LEFT JOIN marks m
              ON m.roll_number = s.roll_number
             AND m.subject_id = sub.subject_id
            WHERE dh.hod_id = "#,
        );
        builder.push_bind(hod_id.to_owned());
        push_eq_filter(&mut builder, "s.course", query.course.as_str().to_owned());

        if let Some(ref dept_id) = query.dept_id {
            push_eq_filter(&mut builder, "s.dept_id", dept_id.as_str().to_owned());
        }
        if let Some(semester) = query.semester {
            push_eq_filter(&mut builder, "sub.semester", semester.value());
        }
        if let Some(ref subject_id) = query.subject_id {
            push_eq_filter(&mut builder, "sub.subject_id", subject_id.as_str().to_owned());
        }

        builder.push(" ORDER BY s.roll_number, sub.subject_id, m.assessment_type");
        debug!(sql = builder.sql(), "scoped marks report");

        let rows = builder
            .build_query_as::<MarkReportRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to build marks report for head '{hod_id}': {error}"
                ))
            })?;

        Ok(rows.into_iter().map(MarkReportRow::from).collect())
    }

    pub(super) async fn find_student_profile_impl(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Option<StudentProfile>> {
        let row = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT s.full_name, s.roll_number, dh.dept_name
            FROM students s
            JOIN department_hod dh ON dh.dept_id = s.dept_id
            WHERE s.roll_number = $1
            LIMIT 1
            "#,
        )
        .bind(roll_number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load profile for student '{roll_number}': {error}"
            ))
        })?;

        Ok(row.map(|(full_name, roll_number, dept_name)| StudentProfile {
            full_name,
            roll_number,
            dept_name,
        }))
    }

    pub(super) async fn marks_summary_for_student_impl(
        &self,
        roll_number: &RollNumber,
    ) -> AppResult<Vec<StudentMarksSummary>> {
        let rows = sqlx::query_as::<_, MarksSummaryRow>(
            r#"
            SELECT sub.subject_id, sub.subject_name,
                   MAX(m.mark) FILTER (WHERE m.assessment_type = 'Assessment 1') AS assessment1,
                   MAX(m.mark) FILTER (WHERE m.assessment_type = 'Assessment 2') AS assessment2,
                   MAX(m.mark) FILTER (WHERE m.assessment_type = 'Assignment') AS assignment
            FROM subjects sub
            LEFT JOIN marks m
              ON m.subject_id = sub.subject_id
             AND m.roll_number = $1
            WHERE sub.dept_id = (SELECT dept_id FROM students WHERE roll_number = $1)
              AND sub.course = (SELECT course FROM students WHERE roll_number = $1)
              AND sub.semester = (SELECT semester FROM students WHERE roll_number = $1)
            GROUP BY sub.subject_id, sub.subject_name
            ORDER BY sub.subject_id
            "#,
        )
        .bind(roll_number.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to pivot marks for student '{roll_number}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(StudentMarksSummary::from).collect())
    }
}
