//! Enrollment handlers

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use gympoint_core::{EnrollmentPatch, NewEnrollment};
use gympoint_types::{Enrollment, EnrollmentId};

use super::shared::{json_body, record_op_duration};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Enrollment>>> {
    let start = Instant::now();
    let result = state.enrollments.list().await;
    record_op_duration("list_enrollments", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /enrollments/{id}
#[instrument(skip(state))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Enrollment>> {
    let id = EnrollmentId::parse(&id)?;
    Ok(Json(state.enrollments.get(id).await?))
}

/// POST /enrollments
#[instrument(skip(state, payload))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    payload: Result<Json<NewEnrollment>, JsonRejection>,
) -> ApiResult<Json<Enrollment>> {
    let input = json_body(payload)?;

    let start = Instant::now();
    let result = state.enrollments.enroll(input).await;
    record_op_duration("create_enrollment", start, result.is_ok());

    Ok(Json(result?))
}

/// PUT /enrollments/{id}
#[instrument(skip(state, payload))]
pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EnrollmentPatch>, JsonRejection>,
) -> ApiResult<Json<Enrollment>> {
    let id = EnrollmentId::parse(&id)?;
    let patch = json_body(payload)?;

    let start = Instant::now();
    let result = state.enrollments.update(id, patch).await;
    record_op_duration("update_enrollment", start, result.is_ok());

    Ok(Json(result?))
}

/// DELETE /enrollments/{id}
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = EnrollmentId::parse(&id)?;

    let start = Instant::now();
    let result = state.enrollments.cancel(id).await;
    record_op_duration("delete_enrollment", start, result.is_ok());

    result?;
    Ok(StatusCode::NO_CONTENT)
}
