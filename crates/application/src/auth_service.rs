//! Credential verification and account registration.

use std::sync::Arc;

use collegia_core::{AppError, AppResult, NonEmptyString, Role, SessionIdentity};
use collegia_domain::EmailAddress;

use crate::ports::{CredentialRepository, PasswordHasher};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validated administrator registration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRegistration {
    /// Administrator login id.
    pub admin_id: NonEmptyString,
    /// Administrator display name.
    pub full_name: NonEmptyString,
    /// Administrator contact email.
    pub email: EmailAddress,
    /// Plaintext password to hash and store.
    pub password: String,
}

/// Application service authenticating sessions against the per-role
/// credential tables.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    /// Creates the service from a credential repository and hasher.
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            credentials,
            password_hasher,
        }
    }

    /// Authenticates a username and password under one role's credential
    /// table and returns the identity to persist in the session.
    ///
    /// Failures are reported with one generic message for unknown
    /// usernames and wrong passwords alike, to prevent enumeration.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> AppResult<SessionIdentity> {
        let credential = self.credentials.find_credential(role, username).await?;

        let Some(credential) = credential else {
            // Hash anyway so unknown usernames cost as much as known ones.
            let _ = self.password_hasher.hash_password(password);
            return Err(invalid_credentials());
        };

        if !self
            .password_hasher
            .verify_password(password, &credential.password_hash)?
        {
            return Err(invalid_credentials());
        }

        Ok(SessionIdentity::new(credential.subject, role))
    }

    /// Registers an administrator account with a hashed password.
    pub async fn register_admin(&self, registration: AdminRegistration) -> AppResult<()> {
        if registration.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {PASSWORD_MIN_LENGTH} characters"
            )));
        }

        let password_hash = self.password_hasher.hash_password(&registration.password)?;
        self.credentials
            .insert_admin(
                registration.admin_id.as_str(),
                registration.full_name.as_str(),
                &registration.email,
                &password_hash,
            )
            .await
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid username or password, please try again".to_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use collegia_core::{AppError, AppResult, NonEmptyString, Role};
    use collegia_domain::EmailAddress;
    use tokio::sync::Mutex;

    use crate::ports::{CredentialRepository, PasswordHasher, StoredCredential};

    use super::{AdminRegistration, AuthService};

    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash_password(&self, password: &str) -> AppResult<String> {
            Ok(format!("hashed:{password}"))
        }

        fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    #[derive(Default)]
    struct FakeCredentialRepository {
        credentials: Vec<(Role, StoredCredential)>,
        registered: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CredentialRepository for FakeCredentialRepository {
        async fn find_credential(
            &self,
            role: Role,
            username: &str,
        ) -> AppResult<Option<StoredCredential>> {
            Ok(self
                .credentials
                .iter()
                .find(|(stored_role, credential)| {
                    *stored_role == role && credential.subject == username
                })
                .map(|(_, credential)| credential.clone()))
        }

        async fn insert_admin(
            &self,
            admin_id: &str,
            _full_name: &str,
            _email: &EmailAddress,
            password_hash: &str,
        ) -> AppResult<()> {
            self.registered
                .lock()
                .await
                .push((admin_id.to_owned(), password_hash.to_owned()));
            Ok(())
        }
    }

    fn service_with(credentials: Vec<(Role, StoredCredential)>) -> AuthService {
        AuthService::new(
            Arc::new(FakeCredentialRepository {
                credentials,
                registered: Mutex::new(Vec::new()),
            }),
            Arc::new(FakeHasher),
        )
    }

    #[tokio::test]
    async fn login_accepts_a_matching_credential() {
        let service = service_with(vec![(
            Role::Hod,
            StoredCredential {
                subject: "H1".to_owned(),
                password_hash: "hashed:open-sesame".to_owned(),
            },
        )]);

        let identity = service.login("H1", "open-sesame", Role::Hod).await;
        assert!(identity.is_ok());
        let identity = identity.unwrap_or_else(|_| unreachable!());
        assert_eq!(identity.subject(), "H1");
        assert_eq!(identity.role(), Role::Hod);
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let service = service_with(vec![(
            Role::Hod,
            StoredCredential {
                subject: "H1".to_owned(),
                password_hash: "hashed:open-sesame".to_owned(),
            },
        )]);

        let result = service.login("H1", "guess", Role::Hod).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn login_rejects_an_unknown_username_with_the_same_message() {
        let service = service_with(Vec::new());

        let unknown = service.login("H9", "whatever", Role::Hod).await;
        let Err(AppError::Unauthorized(unknown_message)) = unknown else {
            unreachable!();
        };

        let service = service_with(vec![(
            Role::Hod,
            StoredCredential {
                subject: "H1".to_owned(),
                password_hash: "hashed:open-sesame".to_owned(),
            },
        )]);
        let wrong = service.login("H1", "guess", Role::Hod).await;
        let Err(AppError::Unauthorized(wrong_message)) = wrong else {
            unreachable!();
        };

        assert_eq!(unknown_message, wrong_message);
    }

    #[tokio::test]
    async fn login_does_not_cross_role_tables() {
        let service = service_with(vec![(
            Role::Faculty,
            StoredCredential {
                subject: "F1".to_owned(),
                password_hash: "hashed:open-sesame".to_owned(),
            },
        )]);

        let result = service.login("F1", "open-sesame", Role::Hod).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn register_admin_rejects_short_passwords() {
        let service = service_with(Vec::new());

        let result = service
            .register_admin(AdminRegistration {
                admin_id: NonEmptyString::new("A1").unwrap_or_else(|_| unreachable!()),
                full_name: NonEmptyString::new("Ada Min").unwrap_or_else(|_| unreachable!()),
                email: EmailAddress::new("ada@example.edu").unwrap_or_else(|_| unreachable!()),
                password: "short".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
