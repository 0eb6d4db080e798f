//! Gympoint business errors

use gympoint_db::DbError;
use thiserror::Error;

/// Business rule errors
#[derive(Error, Debug)]
pub enum GymError {
    /// Request fields are missing or malformed
    #[error("validation failed: {0}")]
    Validation(String),

    /// Student not found
    #[error("student not found")]
    StudentNotFound,

    /// Plan not found
    #[error("plan not found")]
    PlanNotFound,

    /// Enrollment not found
    #[error("enrollment not found")]
    EnrollmentNotFound,

    /// Help order not found
    #[error("help order not found")]
    HelpOrderNotFound,

    /// Weekly check-in quota reached
    #[error("check-in limit exceeded: {count} / {limit} in the last 7 days")]
    CheckinLimitExceeded {
        /// Check-ins already inside the window
        count: i64,
        /// Allowed check-ins per window
        limit: i64,
    },

    /// Plan is still referenced by enrollments
    #[error("plan is referenced by existing enrollments")]
    PlanInUse,

    /// Help order already has an answer
    #[error("help order was already answered")]
    AlreadyAnswered,

    /// Database error
    #[error(transparent)]
    Database(#[from] DbError),
}

impl GymError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound
                | Self::PlanNotFound
                | Self::EnrollmentNotFound
                | Self::HelpOrderNotFound
        )
    }

    /// Check if this is a conflict with the current record state
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PlanInUse | Self::AlreadyAnswered)
    }
}

impl From<validator::ValidationErrors> for GymError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
