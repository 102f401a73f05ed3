use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use collegia_core::SessionIdentity;
use collegia_domain::{FacultyAssignment, FacultyMember, Subject, SubjectId};

use crate::dto::{
    AssignmentListQuery, DeleteSubjectQuery, ScopedListQuery, SubjectPayload,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /subjects - Subjects in the caller's departments.
pub async fn list_subjects_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<ScopedListQuery>,
) -> ApiResult<Json<Vec<Subject>>> {
    let (dept_id, semester, course) = query.into_filters()?;

    let subjects = state
        .subject_service
        .list_subjects(&identity, dept_id, semester, course)
        .await?;

    Ok(Json(subjects))
}

/// POST /add-subject - Create a subject with optional assignment.
pub async fn add_subject_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(payload): Json<SubjectPayload>,
) -> ApiResult<StatusCode> {
    let params = payload.into_params()?;
    state.subject_service.add_subject(&identity, params).await?;

    Ok(StatusCode::OK)
}

/// PUT /update-subject - Update a subject and replace its assignment.
pub async fn update_subject_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(payload): Json<SubjectPayload>,
) -> ApiResult<StatusCode> {
    let params = payload.into_params()?;
    state
        .subject_service
        .update_subject(&identity, params)
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /delete-subject - Remove a subject in the caller's scope.
pub async fn delete_subject_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<DeleteSubjectQuery>,
) -> ApiResult<StatusCode> {
    let subject_id = SubjectId::new(query.subject_id)?;
    state
        .subject_service
        .delete_subject(&identity, &subject_id)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /faculty - Faculty roster in the caller's departments.
pub async fn list_faculty_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<AssignmentListQuery>,
) -> ApiResult<Json<Vec<FacultyMember>>> {
    let dept_id = query.into_filter()?;

    let faculty = state.subject_service.list_faculty(&identity, dept_id).await?;

    Ok(Json(faculty))
}

/// GET /faculty-assignments - Current subject assignments.
pub async fn list_faculty_assignments_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<AssignmentListQuery>,
) -> ApiResult<Json<Vec<FacultyAssignment>>> {
    let dept_id = query.into_filter()?;

    let assignments = state
        .subject_service
        .list_faculty_assignments(&identity, dept_id)
        .await?;

    Ok(Json(assignments))
}
