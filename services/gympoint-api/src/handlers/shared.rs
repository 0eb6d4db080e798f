//! Shared handler utilities

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiResult;

/// Unwrap a JSON body, turning extraction failures into 400 responses
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(body) = payload?;
    Ok(body)
}

/// Record HTTP operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "gympoint_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}
