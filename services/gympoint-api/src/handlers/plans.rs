//! Plan catalog handlers

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use gympoint_core::{NewPlan, PlanPatch};
use gympoint_types::{Plan, PlanId};

use super::shared::{json_body, record_op_duration};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /plans
pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Json<Vec<Plan>>> {
    let start = Instant::now();
    let result = state.plans.list().await;
    record_op_duration("list_plans", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /plans/{id}
#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Plan>> {
    let id = PlanId::parse(&id)?;
    Ok(Json(state.plans.get(id).await?))
}

/// POST /plans
#[instrument(skip(state, payload))]
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<NewPlan>, JsonRejection>,
) -> ApiResult<Json<Plan>> {
    let input = json_body(payload)?;

    let start = Instant::now();
    let result = state.plans.create(input).await;
    record_op_duration("create_plan", start, result.is_ok());

    Ok(Json(result?))
}

/// PUT /plans/{id}
#[instrument(skip(state, payload))]
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlanPatch>, JsonRejection>,
) -> ApiResult<Json<Plan>> {
    let id = PlanId::parse(&id)?;
    let patch = json_body(payload)?;

    let start = Instant::now();
    let result = state.plans.update(id, patch).await;
    record_op_duration("update_plan", start, result.is_ok());

    Ok(Json(result?))
}

/// DELETE /plans/{id}
#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = PlanId::parse(&id)?;

    let start = Instant::now();
    let result = state.plans.delete(id).await;
    record_op_duration("delete_plan", start, result.is_ok());

    result?;
    Ok(StatusCode::NO_CONTENT)
}
