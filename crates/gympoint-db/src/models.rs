//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use gympoint_types::{
    Checkin, CheckinId, Enrollment, EnrollmentId, HelpOrder, HelpOrderId, PendingHelpOrder, Plan,
    PlanId, Student, StudentId, StudentSummary,
};

/// Student row from the database
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Plan row from the database
#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: i64,
    pub title: String,
    pub duration: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment row from the database
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub id: i64,
    pub student_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check-in row from the database
#[derive(Debug, Clone, FromRow)]
pub struct CheckinRow {
    pub id: i64,
    pub student_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Help order row from the database
#[derive(Debug, Clone, FromRow)]
pub struct HelpOrderRow {
    pub id: i64,
    pub student_id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub answer_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unanswered help order joined with the owning student
#[derive(Debug, Clone, FromRow)]
pub struct PendingHelpOrderRow {
    pub id: i64,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub student_id: i64,
    pub student_name: String,
}

// Conversion implementations from Row types to gympoint-types domain types

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: PlanId(row.id),
            title: row.title,
            duration: row.duration,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: EnrollmentId(row.id),
            student_id: StudentId(row.student_id),
            plan_id: PlanId(row.plan_id),
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CheckinRow> for Checkin {
    fn from(row: CheckinRow) -> Self {
        Self {
            id: CheckinId(row.id),
            student_id: StudentId(row.student_id),
            created_at: row.created_at,
        }
    }
}

impl From<HelpOrderRow> for HelpOrder {
    fn from(row: HelpOrderRow) -> Self {
        Self {
            id: HelpOrderId(row.id),
            student_id: StudentId(row.student_id),
            question: row.question,
            answer: row.answer,
            answer_at: row.answer_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PendingHelpOrderRow> for PendingHelpOrder {
    fn from(row: PendingHelpOrderRow) -> Self {
        Self {
            id: HelpOrderId(row.id),
            question: row.question,
            created_at: row.created_at,
            student: StudentSummary {
                id: StudentId(row.student_id),
                name: row.student_name,
            },
        }
    }
}
