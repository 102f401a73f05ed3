use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use collegia_core::AppError;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{LoginRequest, LoginResponse, RegisterAdminRequest};
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

/// POST /auth/login - Authenticate against one role's credential table.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (username, password, role) = payload.into_credentials()?;

    let identity = state.auth_service.login(&username, &password, role).await?;

    // A fresh session id on privilege change blocks session fixation.
    session.cycle_id().await.map_err(|error| {
        AppError::Internal(format!("failed to cycle session id: {error}"))
    })?;
    session
        .insert(SESSION_USER_KEY, identity.clone())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    info!(subject = identity.subject(), role = identity.role().as_str(), "login succeeded");

    Ok(Json(LoginResponse::for_identity(&identity)))
}

/// POST /auth/register-admin - Create an administrator account.
pub async fn register_admin_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAdminRequest>,
) -> ApiResult<StatusCode> {
    let registration = payload.into_registration()?;
    state.auth_service.register_admin(registration).await?;

    Ok(StatusCode::OK)
}
