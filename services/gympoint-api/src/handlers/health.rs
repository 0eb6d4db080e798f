//! Liveness and readiness probes

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Upper bound for the readiness query, below any orchestrator probe timeout
const READY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct ProbeStatus {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl ProbeStatus {
    fn new(status: &'static str, database: Option<&'static str>) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            status,
            database,
        }
    }
}

/// GET /health
pub async fn health() -> Json<ProbeStatus> {
    Json(ProbeStatus::new("alive", None))
}

/// GET /ready
///
/// 503 while Postgres cannot answer a trivial query in time.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ProbeStatus>) {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.pool);

    match tokio::time::timeout(READY_TIMEOUT, ping).await {
        Ok(Ok(_)) => (StatusCode::OK, Json(ProbeStatus::new("ready", Some("connected")))),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness query failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeStatus::new("unavailable", Some("unreachable"))),
            )
        }
        Err(_) => {
            tracing::warn!(timeout = ?READY_TIMEOUT, "Readiness query timed out");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeStatus::new("unavailable", Some("timeout"))),
            )
        }
    }
}
