//! Enrollment types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EnrollmentId, PlanId, StudentId};

/// A student's paid subscription to a plan for a derived date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment ID
    pub id: EnrollmentId,
    /// Enrolled student
    pub student_id: StudentId,
    /// Plan the student enrolled in
    pub plan_id: PlanId,
    /// First day of the enrollment
    pub start_date: NaiveDate,
    /// `start_date` advanced by the plan duration in months
    pub end_date: NaiveDate,
    /// Total price snapshotted when the enrollment was written
    pub price: Decimal,
    /// When the enrollment was created
    pub created_at: DateTime<Utc>,
    /// When the enrollment was last written
    pub updated_at: DateTime<Utc>,
}

/// Price and date range derived from a plan and a start date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentTerms {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Decimal,
}
