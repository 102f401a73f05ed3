use sqlx::QueryBuilder;

use crate::query_scope::push_eq_filter;

use super::*;

impl PostgresStudentRepository {
    pub(super) async fn insert_student_impl(
        &self,
        row: &StudentRow,
        password_hash: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO students (roll_number, full_name, email, password_hash,
                                  dept_id, semester, course)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(row.roll_number.as_str())
        .bind(row.full_name.as_str())
        .bind(row.email.as_str())
        .bind(password_hash)
        .bind(row.dept_id.as_str())
        .bind(row.semester.value())
        .bind(row.course.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| student_conflict_or_internal(error, &row.roll_number))?;

        Ok(())
    }

    pub(super) async fn update_student_impl(
        &self,
        row: &StudentRow,
        password_hash: Option<&str>,
    ) -> AppResult<u64> {
        // The password column is only rewritten when a new hash was supplied.
        let updated = match password_hash {
            Some(password_hash) => {
                sqlx::query(
                    r#"
                    UPDATE students
                    SET full_name = $1,
                        email = $2,
                        password_hash = $3,
                        semester = $4,
                        course = $5
                    WHERE roll_number = $6 AND dept_id = $7
                    "#,
                )
                .bind(row.full_name.as_str())
                .bind(row.email.as_str())
                .bind(password_hash)
                .bind(row.semester.value())
                .bind(row.course.as_str())
                .bind(row.roll_number.as_str())
                .bind(row.dept_id.as_str())
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE students
                    SET full_name = $1,
                        email = $2,
                        semester = $3,
                        course = $4
                    WHERE roll_number = $5 AND dept_id = $6
                    "#,
                )
                .bind(row.full_name.as_str())
                .bind(row.email.as_str())
                .bind(row.semester.value())
                .bind(row.course.as_str())
                .bind(row.roll_number.as_str())
                .bind(row.dept_id.as_str())
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update student '{}': {error}",
                row.roll_number
            ))
        })?;

        Ok(updated.rows_affected())
    }

    pub(super) async fn delete_student_scoped_impl(
        &self,
        roll_number: &RollNumber,
        hod_id: &str,
    ) -> AppResult<u64> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM students
            WHERE roll_number = $1
              AND dept_id IN (SELECT dept_id FROM department_hod WHERE hod_id = $2)
            "#,
        )
        .bind(roll_number.as_str())
        .bind(hod_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete student '{roll_number}': {error}"
            ))
        })?;

        Ok(deleted.rows_affected())
    }

    pub(super) async fn list_students_scoped_impl(
        &self,
        hod_id: &str,
        query: &StudentQuery,
    ) -> AppResult<Vec<StudentRecord>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT s.roll_number, s.full_name, s.email, s.dept_id, s.semester, s.course
            FROM students s
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

        builder.push(" ORDER BY s.roll_number");

        let rows = builder
            .build_query_as::<StudentRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list students for head '{hod_id}': {error}"
                ))
            })?;

        Ok(rows.into_iter().map(StudentRecord::from).collect())
    }
}
