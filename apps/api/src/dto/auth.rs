use collegia_core::{AppResult, NonEmptyString, Role, SessionIdentity};
use collegia_domain::EmailAddress;
use serde::{Deserialize, Serialize};

use collegia_application::AdminRegistration;

use super::{non_blank, require_fields};

/// Incoming payload for the role-aware login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl LoginRequest {
    /// Validates the payload into credentials and a parsed role.
    pub fn into_credentials(self) -> AppResult<(String, String, Role)> {
        require_fields(&[
            ("username", non_blank(self.username.clone()).is_some()),
            (
                "password",
                self.password.as_deref().is_some_and(|v| !v.is_empty()),
            ),
            ("role", non_blank(self.role.clone()).is_some()),
        ])?;

        let role = Role::parse(self.role.unwrap_or_default().trim())?;

        Ok((
            self.username.unwrap_or_default().trim().to_owned(),
            self.password.unwrap_or_default(),
            role,
        ))
    }
}

/// Login outcome with the dashboard path for the authenticated role.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub redirect: String,
}

impl LoginResponse {
    /// Builds the response for a freshly authenticated identity.
    #[must_use]
    pub fn for_identity(identity: &SessionIdentity) -> Self {
        let redirect = match identity.role() {
            Role::Admin => "/Admin",
            Role::Hod => "/HOD",
            Role::Faculty => "/FacultyDashboard",
            Role::Student => "/StudentDashboard",
        };

        Self {
            success: true,
            redirect: redirect.to_owned(),
        }
    }
}

/// Incoming payload for administrator self-registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminRequest {
    pub full_name: Option<String>,
    pub admin_id: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterAdminRequest {
    /// Validates the payload into an admin registration.
    pub fn into_registration(self) -> AppResult<AdminRegistration> {
        require_fields(&[
            ("fullName", non_blank(self.full_name.clone()).is_some()),
            ("adminId", non_blank(self.admin_id.clone()).is_some()),
            ("email", non_blank(self.email.clone()).is_some()),
            (
                "password",
                self.password.as_deref().is_some_and(|v| !v.is_empty()),
            ),
        ])?;

        Ok(AdminRegistration {
            admin_id: NonEmptyString::new(self.admin_id.unwrap_or_default().trim())?,
            full_name: NonEmptyString::new(self.full_name.unwrap_or_default().trim())?,
            email: EmailAddress::new(self.email.unwrap_or_default())?,
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Session identity echo for the authenticated caller.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub role: String,
}

impl From<SessionIdentity> for IdentityResponse {
    fn from(identity: SessionIdentity) -> Self {
        Self {
            id: identity.subject().to_owned(),
            role: identity.role().as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use collegia_core::{AppError, Role, SessionIdentity};

    use super::{LoginRequest, LoginResponse};

    #[test]
    fn login_request_parses_role_and_trims_username() {
        let request = LoginRequest {
            username: Some(" H1 ".to_owned()),
            password: Some("open-sesame".to_owned()),
            role: Some("hod".to_owned()),
        };

        let parsed = request.into_credentials();
        assert!(parsed.is_ok());
        let (username, password, role) = parsed.unwrap_or_else(|_| unreachable!());
        assert_eq!(username, "H1");
        assert_eq!(password, "open-sesame");
        assert_eq!(role, Role::Hod);
    }

    #[test]
    fn login_request_reports_missing_fields() {
        let request = LoginRequest {
            username: None,
            password: Some("x".to_owned()),
            role: None,
        };

        let result = request.into_credentials();
        let Err(AppError::Validation(message)) = result else {
            unreachable!();
        };
        assert!(message.contains("username"));
        assert!(message.contains("role"));
    }

    #[test]
    fn login_request_rejects_unknown_roles() {
        let request = LoginRequest {
            username: Some("X1".to_owned()),
            password: Some("x".to_owned()),
            role: Some("registrar".to_owned()),
        };

        assert!(request.into_credentials().is_err());
    }

    #[test]
    fn login_response_picks_the_role_dashboard() {
        let identity = SessionIdentity::new("H1", Role::Hod);
        let response = LoginResponse::for_identity(&identity);
        assert!(response.success);
        assert_eq!(response.redirect, "/HOD");
    }
}
