//! Error types for the Gympoint API service.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gympoint_core::GymError;
use gympoint_types::GympointError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidId(#[from] GympointError),

    #[error(transparent)]
    Gym(#[from] GymError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Gym(err) => match err {
                GymError::Validation(_) => StatusCode::BAD_REQUEST,
                GymError::CheckinLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                e if e.is_not_found() => StatusCode::NOT_FOUND,
                e if e.is_conflict() => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Gym(err) => match err {
                GymError::Validation(_) => "VALIDATION_ERROR",
                GymError::StudentNotFound => "STUDENT_NOT_FOUND",
                GymError::PlanNotFound => "PLAN_NOT_FOUND",
                GymError::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
                GymError::HelpOrderNotFound => "HELP_ORDER_NOT_FOUND",
                GymError::CheckinLimitExceeded { .. } => "CHECKIN_LIMIT_EXCEEDED",
                GymError::PlanInUse => "PLAN_IN_USE",
                GymError::AlreadyAnswered => "ALREADY_ANSWERED",
                GymError::Database(_) => "INTERNAL_ERROR",
            },
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Storage details stay in the logs
        let message = if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use gympoint_db::DbError;
    use gympoint_types::StudentId;

    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        for err in [
            GymError::StudentNotFound,
            GymError::PlanNotFound,
            GymError::EnrollmentNotFound,
            GymError::HelpOrderNotFound,
        ] {
            assert_eq!(status_of(err), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_rule_violations() {
        assert_eq!(
            status_of(GymError::CheckinLimitExceeded { count: 5, limit: 5 }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(status_of(GymError::PlanInUse), StatusCode::CONFLICT);
        assert_eq!(status_of(GymError::AlreadyAnswered), StatusCode::CONFLICT);
        assert_eq!(
            status_of(GymError::Validation("title: blank".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_bad_ids_and_internal_errors() {
        let invalid = StudentId::parse("abc").unwrap_err();
        assert_eq!(status_of(invalid), StatusCode::BAD_REQUEST);

        let db = GymError::Database(DbError::NotFound);
        assert_eq!(status_of(db), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::from(GymError::CheckinLimitExceeded { count: 5, limit: 5 }).error_code(),
            "CHECKIN_LIMIT_EXCEEDED"
        );
        assert_eq!(
            ApiError::from(GymError::Database(DbError::NotFound)).error_code(),
            "INTERNAL_ERROR"
        );
        assert_eq!(
            ApiError::BadRequest("oops".into()).error_code(),
            "BAD_REQUEST"
        );
    }
}
