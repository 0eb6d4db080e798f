//! Help-order flow: students ask, staff answer once

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use gympoint_db::{HelpOrderRepository, StudentRepository};
use gympoint_types::{HelpOrder, HelpOrderId, HelpOrderView, PendingHelpOrder, Student, StudentId};

use crate::notifier::{dispatch, Notifier};
use crate::templates;
use crate::validation::not_blank;
use crate::GymError;

/// A student's question
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewHelpOrder {
    #[validate(custom(function = "not_blank"))]
    pub question: String,
}

/// A staff answer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerHelpOrder {
    #[validate(custom(function = "not_blank"))]
    pub answer: String,
}

/// Help order service
pub struct HelpOrderService<S: StudentRepository, H: HelpOrderRepository> {
    students: Arc<S>,
    help_orders: Arc<H>,
    notifier: Arc<dyn Notifier>,
}

impl<S: StudentRepository, H: HelpOrderRepository> HelpOrderService<S, H> {
    /// Create a new help order service
    pub fn new(students: Arc<S>, help_orders: Arc<H>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            students,
            help_orders,
            notifier,
        }
    }

    /// Open a help order for a student
    #[instrument(skip(self, input), fields(student_id = %student_id))]
    pub async fn ask(
        &self,
        student_id: StudentId,
        input: NewHelpOrder,
    ) -> Result<HelpOrder, GymError> {
        input.validate()?;
        self.student(student_id).await?;

        let row = self
            .help_orders
            .create(student_id.0, input.question.trim())
            .await?;

        info!(help_order_id = row.id, "Help order created");
        Ok(row.into())
    }

    /// A student's help orders as the student sees them
    pub async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<HelpOrderView>, GymError> {
        self.student(student_id).await?;

        let rows = self.help_orders.find_by_student_id(student_id.0).await?;
        Ok(rows
            .into_iter()
            .map(|row| HelpOrder::from(row).view())
            .collect())
    }

    /// Orders still waiting for staff, with their students
    pub async fn list_unanswered(&self) -> Result<Vec<PendingHelpOrder>, GymError> {
        let rows = self.help_orders.find_unanswered().await?;
        Ok(rows.into_iter().map(PendingHelpOrder::from).collect())
    }

    /// Answer a help order now and notify the student
    pub async fn answer(
        &self,
        id: HelpOrderId,
        input: AnswerHelpOrder,
    ) -> Result<HelpOrder, GymError> {
        self.answer_at(id, input, Utc::now()).await
    }

    /// Answer a help order with an explicit answer time.
    ///
    /// An order is answered at most once; a second answer is a conflict.
    #[instrument(skip(self, input), fields(help_order_id = %id))]
    pub async fn answer_at(
        &self,
        id: HelpOrderId,
        input: AnswerHelpOrder,
        answered_at: DateTime<Utc>,
    ) -> Result<HelpOrder, GymError> {
        input.validate()?;

        let existing: HelpOrder = self
            .help_orders
            .find_by_id(id.0)
            .await?
            .ok_or(GymError::HelpOrderNotFound)?
            .into();
        if existing.is_answered() {
            return Err(GymError::AlreadyAnswered);
        }

        // The guarded update loses to a concurrent answer.
        let order: HelpOrder = self
            .help_orders
            .answer(id.0, input.answer.trim(), answered_at)
            .await?
            .ok_or(GymError::AlreadyAnswered)?
            .into();

        info!("Help order answered");

        let student = self.student(order.student_id).await?;
        dispatch(
            self.notifier.as_ref(),
            templates::help_order_answered(&student, &order),
        )
        .await;

        Ok(order)
    }

    async fn student(&self, id: StudentId) -> Result<Student, GymError> {
        self.students
            .find_by_id(id.0)
            .await?
            .map(Student::from)
            .ok_or(GymError::StudentNotFound)
    }
}
