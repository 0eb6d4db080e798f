//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::DbResult;
use crate::models::*;

/// Student repository trait
///
/// Students are owned by another service; this side only reads them.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find a student by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<StudentRow>>;
}

/// Plan repository trait
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// List all plans
    async fn list(&self) -> DbResult<Vec<PlanRow>>;

    /// Find a plan by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<PlanRow>>;

    /// Create a new plan
    async fn create(&self, plan: WritePlan) -> DbResult<PlanRow>;

    /// Overwrite every column of an existing plan
    async fn update(&self, id: i64, plan: WritePlan) -> DbResult<PlanRow>;

    /// Delete a plan
    ///
    /// Fails with [`DbError::StillReferenced`](crate::DbError::StillReferenced)
    /// while enrollments point at it.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Plan column values for insert and update
#[derive(Debug, Clone)]
pub struct WritePlan {
    pub title: String,
    pub duration: i32,
    pub price: Decimal,
}

/// Enrollment repository trait
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// List all enrollments
    async fn list(&self) -> DbResult<Vec<EnrollmentRow>>;

    /// Find an enrollment by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<EnrollmentRow>>;

    /// Create a new enrollment
    async fn create(&self, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow>;

    /// Overwrite every column of an existing enrollment
    async fn update(&self, id: i64, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow>;

    /// Delete an enrollment
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Enrollment column values for insert and update
#[derive(Debug, Clone)]
pub struct WriteEnrollment {
    pub student_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Decimal,
}

/// Outcome of a quota-checked check-in insert
#[derive(Debug, Clone)]
pub enum CheckinAdmission {
    /// The check-in was stored
    Admitted(CheckinRow),
    /// The student already reached the limit inside the window
    Rejected {
        /// Check-ins found inside the window
        recent: i64,
    },
}

/// Check-in repository trait
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Find all check-ins for a student, oldest first
    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<CheckinRow>>;

    /// Count the student's check-ins created at or after `window_start` and,
    /// when fewer than `limit`, insert one stamped `now`.
    ///
    /// Count and insert form one atomic step so concurrent callers for the
    /// same student cannot both slip under the limit. Returns
    /// [`DbError::NotFound`](crate::DbError::NotFound) when the student does
    /// not exist.
    async fn admit(
        &self,
        student_id: i64,
        window_start: DateTime<Utc>,
        limit: i64,
        now: DateTime<Utc>,
    ) -> DbResult<CheckinAdmission>;
}

/// Help order repository trait
#[async_trait]
pub trait HelpOrderRepository: Send + Sync {
    /// Find a help order by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<HelpOrderRow>>;

    /// Find all help orders for a student
    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<HelpOrderRow>>;

    /// Find all unanswered help orders with their students
    async fn find_unanswered(&self) -> DbResult<Vec<PendingHelpOrderRow>>;

    /// Create a new, unanswered help order
    async fn create(&self, student_id: i64, question: &str) -> DbResult<HelpOrderRow>;

    /// Set answer and answer time together.
    ///
    /// Returns `None` when the order does not exist or was already answered.
    async fn answer(
        &self,
        id: i64,
        answer: &str,
        answered_at: DateTime<Utc>,
    ) -> DbResult<Option<HelpOrderRow>>;
}
