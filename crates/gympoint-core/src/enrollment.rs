//! Enrollment rule engine
//!
//! An enrollment snapshots the plan's total price and derives its end date
//! from the plan duration. Both are recomputed from the current plan on
//! every write.

use std::sync::Arc;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use gympoint_db::{
    DbError, EnrollmentRepository, PlanRepository, StudentRepository, WriteEnrollment,
};
use gympoint_types::{Enrollment, EnrollmentId, EnrollmentTerms, Plan, PlanId, Student, StudentId};

use crate::notifier::{dispatch, Notifier};
use crate::templates;
use crate::validation::total_price_fits;
use crate::GymError;

/// Input for a new enrollment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEnrollment {
    #[validate(range(min = 1))]
    pub student_id: i64,
    #[validate(range(min = 1))]
    pub plan_id: i64,
    pub start_date: String,
}

/// Partial enrollment update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EnrollmentPatch {
    #[validate(range(min = 1))]
    pub student_id: Option<i64>,
    #[validate(range(min = 1))]
    pub plan_id: Option<i64>,
    pub start_date: Option<String>,
}

/// Parse a start date given as `YYYY-MM-DD` or as an ISO 8601 timestamp.
///
/// Timestamps keep the calendar date in their own offset.
pub fn parse_start_date(raw: &str) -> Result<NaiveDate, GymError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts.date());
    }

    Err(GymError::Validation(format!(
        "start_date: '{raw}' is not a valid date"
    )))
}

/// Derive price and end date for enrolling in `plan` from `start_date`.
///
/// Month arithmetic clamps to the last day of the target month, so
/// Jan 31 plus one month is Feb 28 (or 29).
pub fn enrollment_terms(plan: &Plan, start_date: NaiveDate) -> Result<EnrollmentTerms, GymError> {
    let months = u32::try_from(plan.duration)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| GymError::Validation("plan duration must be positive".into()))?;
    total_price_fits(plan.duration, plan.price)?;

    let end_date = start_date
        .checked_add_months(Months::new(months))
        .ok_or_else(|| GymError::Validation("start_date is out of range".into()))?;

    Ok(EnrollmentTerms {
        start_date,
        end_date,
        price: plan.total_price(),
    })
}

/// Enrollment service
pub struct EnrollmentService<S, P, E>
where
    S: StudentRepository,
    P: PlanRepository,
    E: EnrollmentRepository,
{
    students: Arc<S>,
    plans: Arc<P>,
    enrollments: Arc<E>,
    notifier: Arc<dyn Notifier>,
}

impl<S, P, E> EnrollmentService<S, P, E>
where
    S: StudentRepository,
    P: PlanRepository,
    E: EnrollmentRepository,
{
    /// Create a new enrollment service
    pub fn new(
        students: Arc<S>,
        plans: Arc<P>,
        enrollments: Arc<E>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            students,
            plans,
            enrollments,
            notifier,
        }
    }

    /// List every enrollment
    pub async fn list(&self) -> Result<Vec<Enrollment>, GymError> {
        let rows = self.enrollments.list().await?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    /// Look up a single enrollment
    pub async fn get(&self, id: EnrollmentId) -> Result<Enrollment, GymError> {
        self.enrollments
            .find_by_id(id.0)
            .await?
            .map(Enrollment::from)
            .ok_or(GymError::EnrollmentNotFound)
    }

    /// Enroll a student in a plan and mail them a confirmation
    #[instrument(skip(self, input), fields(student_id = input.student_id, plan_id = input.plan_id))]
    pub async fn enroll(&self, input: NewEnrollment) -> Result<Enrollment, GymError> {
        input.validate()?;
        let start_date = parse_start_date(&input.start_date)?;

        let student = self.student(StudentId(input.student_id)).await?;
        let plan = self.plan(PlanId(input.plan_id)).await?;
        let terms = enrollment_terms(&plan, start_date)?;

        let row = self
            .enrollments
            .create(write_enrollment(&student, &plan, &terms))
            .await?;

        info!(
            enrollment_id = row.id,
            end_date = %terms.end_date,
            price = %terms.price,
            "Enrollment created"
        );
        metrics::counter!("gympoint_enrollments_created_total").increment(1);

        let notification = templates::enrollment_confirmation(&student, &plan, &terms);
        dispatch(self.notifier.as_ref(), notification).await;

        Ok(row.into())
    }

    /// Change an enrollment.
    ///
    /// Absent fields fall back to the stored record, then student and plan are
    /// resolved again and price and end date are derived from scratch.
    #[instrument(skip(self, patch), fields(enrollment_id = %id))]
    pub async fn update(
        &self,
        id: EnrollmentId,
        patch: EnrollmentPatch,
    ) -> Result<Enrollment, GymError> {
        patch.validate()?;
        let start_date = patch
            .start_date
            .as_deref()
            .map(parse_start_date)
            .transpose()?;

        let current = self.get(id).await?;

        let student_id = patch.student_id.map_or(current.student_id, StudentId);
        let plan_id = patch.plan_id.map_or(current.plan_id, PlanId);
        let start_date = start_date.unwrap_or(current.start_date);

        let student = self.student(student_id).await?;
        let plan = self.plan(plan_id).await?;
        let terms = enrollment_terms(&plan, start_date)?;

        let row = self
            .enrollments
            .update(id.0, write_enrollment(&student, &plan, &terms))
            .await
            .map_err(|e| match e {
                DbError::NotFound => GymError::EnrollmentNotFound,
                other => other.into(),
            })?;

        info!(end_date = %terms.end_date, price = %terms.price, "Enrollment updated");
        Ok(row.into())
    }

    /// Cancel an enrollment
    #[instrument(skip(self), fields(enrollment_id = %id))]
    pub async fn cancel(&self, id: EnrollmentId) -> Result<(), GymError> {
        self.enrollments.delete(id.0).await.map_err(|e| match e {
            DbError::NotFound => GymError::EnrollmentNotFound,
            other => other.into(),
        })?;

        info!("Enrollment canceled");
        Ok(())
    }

    async fn student(&self, id: StudentId) -> Result<Student, GymError> {
        self.students
            .find_by_id(id.0)
            .await?
            .map(Student::from)
            .ok_or(GymError::StudentNotFound)
    }

    async fn plan(&self, id: PlanId) -> Result<Plan, GymError> {
        self.plans
            .find_by_id(id.0)
            .await?
            .map(Plan::from)
            .ok_or(GymError::PlanNotFound)
    }
}

fn write_enrollment(student: &Student, plan: &Plan, terms: &EnrollmentTerms) -> WriteEnrollment {
    WriteEnrollment {
        student_id: student.id.0,
        plan_id: plan.id.0,
        start_date: terms.start_date,
        end_date: terms.end_date,
        price: terms.price,
    }
}
