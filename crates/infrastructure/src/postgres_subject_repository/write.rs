use super::*;

impl PostgresSubjectRepository {
    pub(super) async fn create_subject_impl(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start create transaction for subject '{}': {error}",
                draft.subject_id
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO subjects (subject_id, subject_name, dept_id, semester, course)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(draft.subject_id.as_str())
        .bind(draft.subject_name.as_str())
        .bind(draft.dept_id.as_str())
        .bind(draft.semester.value())
        .bind(draft.course.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| subject_conflict_or_internal(error, &draft.subject_id))?;

        if let Some(faculty_id) = faculty_id {
            sqlx::query(
                r#"
                INSERT INTO faculty_subjects (faculty_id, subject_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(faculty_id.as_str())
            .bind(draft.subject_id.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to assign faculty '{faculty_id}' to subject '{}': {error}",
                    draft.subject_id
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit create transaction for subject '{}': {error}",
                draft.subject_id
            ))
        })
    }

    pub(super) async fn update_subject_impl(
        &self,
        draft: &SubjectDraft,
        faculty_id: Option<&FacultyId>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start update transaction for subject '{}': {error}",
                draft.subject_id
            ))
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE subjects
            SET subject_name = $1,
                semester = $2,
                course = $3
            WHERE subject_id = $4 AND dept_id = $5
            "#,
        )
        .bind(draft.subject_name.as_str())
        .bind(draft.semester.value())
        .bind(draft.course.as_str())
        .bind(draft.subject_id.as_str())
        .bind(draft.dept_id.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update subject '{}': {error}",
                draft.subject_id
            ))
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "subject '{}' does not exist in department '{}'",
                draft.subject_id, draft.dept_id
            )));
        }

        // Replace, never merge: clear every assignment row for the subject,
        // including duplicate legacy rows, before the new insert.
        sqlx::query("DELETE FROM faculty_subjects WHERE subject_id = $1")
            .bind(draft.subject_id.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to clear faculty assignments for subject '{}': {error}",
                    draft.subject_id
                ))
            })?;

        if let Some(faculty_id) = faculty_id {
            sqlx::query(
                r#"
                INSERT INTO faculty_subjects (faculty_id, subject_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(faculty_id.as_str())
            .bind(draft.subject_id.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to assign faculty '{faculty_id}' to subject '{}': {error}",
                    draft.subject_id
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit update transaction for subject '{}': {error}",
                draft.subject_id
            ))
        })
    }

    pub(super) async fn delete_subject_scoped_impl(
        &self,
        subject_id: &SubjectId,
        hod_id: &str,
    ) -> AppResult<u64> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM subjects
            WHERE subject_id = $1
              AND dept_id IN (SELECT dept_id FROM department_hod WHERE hod_id = $2)
            "#,
        )
        .bind(subject_id.as_str())
        .bind(hod_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete subject '{subject_id}': {error}"
            ))
        })?;

        Ok(deleted.rows_affected())
    }
}
