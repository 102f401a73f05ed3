//! Student self-service handlers.

use axum::Json;
use axum::extract::{Extension, Query, State};
use collegia_core::SessionIdentity;
use collegia_domain::{StudentMarksSummary, StudentProfile};

use crate::dto::StudentMarksQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /student-details - The caller's own student record.
pub async fn student_profile_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Json<StudentProfile>> {
    let profile = state.student_service.student_profile(&identity).await?;

    Ok(Json(profile))
}

/// GET /student-marks - The caller's own marks pivot.
pub async fn student_marks_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<StudentMarksQuery>,
) -> ApiResult<Json<Vec<StudentMarksSummary>>> {
    let summary = state
        .student_service
        .student_marks(&identity, &query.roll_number)
        .await?;

    Ok(Json(summary))
}
