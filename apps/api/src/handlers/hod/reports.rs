use axum::Json;
use axum::extract::{Extension, Query, State};
use collegia_core::SessionIdentity;
use collegia_domain::{HodProfile, MarkReportRow};

use crate::dto::MarksReportQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /hod-details - Headship profile for the dashboard.
pub async fn hod_profile_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Json<HodProfile>> {
    let profile = state.subject_service.hod_profile(&identity).await?;

    Ok(Json(profile))
}

/// GET /hod-marks - Wide students-subjects-marks report.
pub async fn marks_report_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<MarksReportQuery>,
) -> ApiResult<Json<Vec<MarkReportRow>>> {
    let (dept_id, semester, course, subject_id) = query.into_filters()?;

    let report = state
        .student_service
        .marks_report(&identity, dept_id, semester, course, subject_id)
        .await?;

    Ok(Json(report))
}
