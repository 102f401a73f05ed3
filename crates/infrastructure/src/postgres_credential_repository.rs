//! PostgreSQL-backed credential lookups over the per-role tables.

use async_trait::async_trait;
use sqlx::PgPool;

use collegia_application::{CredentialRepository, StoredCredential};
use collegia_core::{AppError, AppResult, Role};
use collegia_domain::EmailAddress;

/// PostgreSQL implementation of the credential repository port.
///
/// Each role authenticates against its own table, as the portal schema
/// keeps separate account tables per role.
#[derive(Clone)]
pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn credential_query(role: Role) -> &'static str {
    match role {
        Role::Admin => {
            "SELECT admin_id AS subject, password_hash FROM admin WHERE admin_id = $1 LIMIT 1"
        }
        Role::Hod => {
            "SELECT hod_id AS subject, password_hash FROM department_hod WHERE hod_id = $1 LIMIT 1"
        }
        Role::Faculty => {
            "SELECT faculty_id AS subject, password_hash FROM faculty WHERE faculty_id = $1 LIMIT 1"
        }
        Role::Student => {
            "SELECT roll_number AS subject, password_hash FROM students WHERE roll_number = $1 LIMIT 1"
        }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_credential(
        &self,
        role: Role,
        username: &str,
    ) -> AppResult<Option<StoredCredential>> {
        let row = sqlx::query_as::<_, (String, String)>(credential_query(role))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to look up '{}' credential: {error}",
                    role.as_str()
                ))
            })?;

        Ok(row.map(|(subject, password_hash)| StoredCredential {
            subject,
            password_hash,
        }))
    }

    async fn insert_admin(
        &self,
        admin_id: &str,
        full_name: &str,
        email: &EmailAddress,
        password_hash: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin (admin_id, full_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(admin_id)
        .bind(full_name)
        .bind(email.as_str())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if let sqlx::Error::Database(ref database_error) = error
                && database_error.code().as_deref() == Some("23505")
            {
                return AppError::Conflict(
                    "an administrator with this id or email already exists".to_owned(),
                );
            }

            AppError::Internal(format!("failed to register administrator: {error}"))
        })?;

        Ok(())
    }
}
