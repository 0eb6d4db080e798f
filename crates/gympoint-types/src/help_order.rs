//! Help order types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{HelpOrderId, StudentId, StudentSummary};

/// A student-submitted question awaiting a staff answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpOrder {
    /// Help order ID
    pub id: HelpOrderId,
    /// Student who asked
    pub student_id: StudentId,
    /// The question
    pub question: String,
    /// Staff answer, set together with `answer_at`
    pub answer: Option<String>,
    /// When the answer was given
    pub answer_at: Option<DateTime<Utc>>,
    /// When the question was asked
    pub created_at: DateTime<Utc>,
    /// When the order was last written
    pub updated_at: DateTime<Utc>,
}

impl HelpOrder {
    /// Whether staff already answered this order
    pub fn is_answered(&self) -> bool {
        self.answer_at.is_some()
    }

    /// Student-facing projection
    pub fn view(&self) -> HelpOrderView {
        HelpOrderView {
            student_id: self.student_id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            answer_at: self.answer_at,
        }
    }
}

/// Help order as shown to the student who asked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpOrderView {
    pub student_id: StudentId,
    pub question: String,
    pub answer: Option<String>,
    pub answer_at: Option<DateTime<Utc>>,
}

/// Unanswered help order joined with its owner, for the staff queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHelpOrder {
    pub id: HelpOrderId,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub student: StudentSummary,
}
