//! Check-in handlers

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use gympoint_types::{Checkin, StudentId};

use super::shared::record_op_duration;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /students/{id}/checkins
#[instrument(skip(state))]
pub async fn list_checkins(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Vec<Checkin>>> {
    let student_id = StudentId::parse(&student_id)?;
    Ok(Json(state.checkins.list(student_id).await?))
}

/// POST /students/{id}/checkins
#[instrument(skip(state))]
pub async fn create_checkin(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Checkin>> {
    let student_id = StudentId::parse(&student_id)?;

    let start = Instant::now();
    let result = state.checkins.check_in(student_id).await;
    record_op_duration("create_checkin", start, result.is_ok());

    Ok(Json(result?))
}
