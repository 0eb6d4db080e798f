//! Help order handlers

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use gympoint_core::{AnswerHelpOrder, NewHelpOrder};
use gympoint_types::{HelpOrder, HelpOrderId, HelpOrderView, PendingHelpOrder, StudentId};

use super::shared::{json_body, record_op_duration};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /students/{id}/help-orders
#[instrument(skip(state))]
pub async fn list_student_help_orders(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Vec<HelpOrderView>>> {
    let student_id = StudentId::parse(&student_id)?;
    Ok(Json(state.help_orders.list_for_student(student_id).await?))
}

/// POST /students/{id}/help-orders
#[instrument(skip(state, payload))]
pub async fn create_help_order(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    payload: Result<Json<NewHelpOrder>, JsonRejection>,
) -> ApiResult<Json<HelpOrder>> {
    let student_id = StudentId::parse(&student_id)?;
    let input = json_body(payload)?;

    let start = Instant::now();
    let result = state.help_orders.ask(student_id, input).await;
    record_op_duration("create_help_order", start, result.is_ok());

    Ok(Json(result?))
}

/// GET /help-orders
pub async fn list_unanswered_help_orders(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PendingHelpOrder>>> {
    Ok(Json(state.help_orders.list_unanswered().await?))
}

/// PUT /help-orders/{id}/answer
#[instrument(skip(state, payload))]
pub async fn answer_help_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AnswerHelpOrder>, JsonRejection>,
) -> ApiResult<Json<HelpOrder>> {
    let id = HelpOrderId::parse(&id)?;
    let input = json_body(payload)?;

    let start = Instant::now();
    let result = state.help_orders.answer(id, input).await;
    record_op_duration("answer_help_order", start, result.is_ok());

    Ok(Json(result?))
}
