//! Weekly check-in limiter

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use gympoint_db::{CheckinAdmission, CheckinRepository, DbError, StudentRepository};
use gympoint_types::{Checkin, StudentId};

use crate::config::RulesConfig;
use crate::GymError;

/// Check-in service
pub struct CheckinService<S: StudentRepository, C: CheckinRepository> {
    students: Arc<S>,
    checkins: Arc<C>,
    rules: RulesConfig,
}

impl<S: StudentRepository, C: CheckinRepository> CheckinService<S, C> {
    /// Create a new check-in service
    pub fn new(students: Arc<S>, checkins: Arc<C>, rules: RulesConfig) -> Self {
        Self {
            students,
            checkins,
            rules,
        }
    }

    /// List a student's check-ins in storage order
    pub async fn list(&self, student_id: StudentId) -> Result<Vec<Checkin>, GymError> {
        self.ensure_student(student_id).await?;

        let rows = self.checkins.find_by_student_id(student_id.0).await?;
        Ok(rows.into_iter().map(Checkin::from).collect())
    }

    /// Record a visit at the current server time
    pub async fn check_in(&self, student_id: StudentId) -> Result<Checkin, GymError> {
        self.check_in_at(student_id, Utc::now()).await
    }

    /// Record a visit at `now`.
    ///
    /// Check-ins created at or after `now - window` count toward the limit.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn check_in_at(
        &self,
        student_id: StudentId,
        now: DateTime<Utc>,
    ) -> Result<Checkin, GymError> {
        self.ensure_student(student_id).await?;

        let window_start = now - self.rules.checkin_window;
        let admission = self
            .checkins
            .admit(student_id.0, window_start, self.rules.checkin_limit, now)
            .await
            .map_err(|e| match e {
                DbError::NotFound => GymError::StudentNotFound,
                other => other.into(),
            })?;

        match admission {
            CheckinAdmission::Admitted(row) => {
                info!(checkin_id = row.id, "Check-in recorded");
                metrics::counter!("gympoint_checkins_created_total").increment(1);
                Ok(row.into())
            }
            CheckinAdmission::Rejected { recent } => {
                warn!(recent, limit = self.rules.checkin_limit, "Check-in limit reached");
                metrics::counter!("gympoint_checkins_rejected_total").increment(1);
                Err(GymError::CheckinLimitExceeded {
                    count: recent,
                    limit: self.rules.checkin_limit,
                })
            }
        }
    }

    async fn ensure_student(&self, id: StudentId) -> Result<(), GymError> {
        match self.students.find_by_id(id.0).await? {
            Some(_) => Ok(()),
            None => Err(GymError::StudentNotFound),
        }
    }
}
