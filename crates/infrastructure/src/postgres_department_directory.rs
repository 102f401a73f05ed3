//! PostgreSQL-backed department headship directory.

use async_trait::async_trait;
use sqlx::PgPool;

use collegia_application::DepartmentDirectory;
use collegia_core::{AppError, AppResult};
use collegia_domain::{DeptId, HodProfile};

/// PostgreSQL implementation of the department directory port.
#[derive(Clone)]
pub struct PostgresDepartmentDirectory {
    pool: PgPool,
}

impl PostgresDepartmentDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HodProfileRow {
    hod_name: String,
    dept_id: String,
    dept_name: String,
}

#[async_trait]
impl DepartmentDirectory for PostgresDepartmentDirectory {
    async fn resolve_owned_dept(&self, hod_id: &str) -> AppResult<Option<DeptId>> {
        let dept_id = sqlx::query_scalar::<_, String>(
            r#"
            SELECT dept_id
            FROM department_hod
            WHERE hod_id = $1
            LIMIT 1
            "#,
        )
        .bind(hod_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to resolve department for head '{hod_id}': {error}"
            ))
        })?;

        dept_id.map(DeptId::new).transpose()
    }

    async fn find_hod_profile(&self, hod_id: &str) -> AppResult<Option<HodProfile>> {
        let row = sqlx::query_as::<_, HodProfileRow>(
            r#"
            SELECT hod_name, dept_id, dept_name
            FROM department_hod
            WHERE hod_id = $1
            LIMIT 1
            "#,
        )
        .bind(hod_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load headship profile for '{hod_id}': {error}"
            ))
        })?;

        row.map(|row| {
            Ok(HodProfile {
                hod_name: row.hod_name,
                dept_id: DeptId::new(row.dept_id)?,
                dept_name: row.dept_name,
            })
        })
        .transpose()
    }
}
