use axum::Json;
use axum::http::StatusCode;
use collegia_core::{AppError, SessionIdentity};
use tower_sessions::Session;

use crate::dto::IdentityResponse;
use crate::error::ApiResult;

use super::SESSION_USER_KEY;

/// POST /auth/logout - Destroy the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::OK)
}

/// GET /auth/me - Echo the authenticated identity.
pub async fn me_handler(session: Session) -> ApiResult<Json<IdentityResponse>> {
    let identity = session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    Ok(Json(IdentityResponse::from(identity)))
}
