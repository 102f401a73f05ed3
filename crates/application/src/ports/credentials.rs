use async_trait::async_trait;

use collegia_core::{AppResult, Role};
use collegia_domain::EmailAddress;

/// Stored login credential resolved from a role's credential table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    /// Subject id the credential belongs to.
    pub subject: String,
    /// Argon2id hash of the account password.
    pub password_hash: String,
}

/// Repository port for per-role credential lookups.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Finds the stored credential for a username under one role's
    /// credential table.
    async fn find_credential(
        &self,
        role: Role,
        username: &str,
    ) -> AppResult<Option<StoredCredential>>;

    /// Inserts an administrator account. Duplicate admin ids or emails
    /// yield `Conflict`.
    async fn insert_admin(
        &self,
        admin_id: &str,
        full_name: &str,
        email: &EmailAddress,
        password_hash: &str,
    ) -> AppResult<()>;
}

/// Port for password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
