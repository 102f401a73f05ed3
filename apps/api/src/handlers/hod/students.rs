use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use collegia_core::SessionIdentity;
use collegia_domain::{RollNumber, StudentRecord};

use crate::dto::{DeleteStudentQuery, ScopedListQuery, StudentPayload};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /hod-students - Students in the caller's departments.
pub async fn list_students_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<ScopedListQuery>,
) -> ApiResult<Json<Vec<StudentRecord>>> {
    let (dept_id, semester, course) = query.into_filters()?;

    let students = state
        .student_service
        .list_students(&identity, dept_id, semester, course)
        .await?;

    Ok(Json(students))
}

/// POST /add-student - Enroll a student.
pub async fn add_student_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(payload): Json<StudentPayload>,
) -> ApiResult<StatusCode> {
    let params = payload.into_params(true)?;
    state.student_service.add_student(&identity, params).await?;

    Ok(StatusCode::OK)
}

/// PUT /update-student - Update a student row.
pub async fn update_student_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(payload): Json<StudentPayload>,
) -> ApiResult<StatusCode> {
    let params = payload.into_params(false)?;
    state
        .student_service
        .update_student(&identity, params)
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /delete-student - Remove a student in the caller's scope.
pub async fn delete_student_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<DeleteStudentQuery>,
) -> ApiResult<StatusCode> {
    let roll_number = RollNumber::new(query.roll_number)?;
    state
        .student_service
        .delete_student(&identity, &roll_number)
        .await?;

    Ok(StatusCode::OK)
}
