//! PostgreSQL help order repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::{HelpOrderRow, PendingHelpOrderRow};
use crate::repo::HelpOrderRepository;

/// PostgreSQL help order repository
#[derive(Clone)]
pub struct PgHelpOrderRepository {
    pool: PgPool,
}

impl PgHelpOrderRepository {
    /// Create a new help order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HelpOrderRepository for PgHelpOrderRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<HelpOrderRow>> {
        let order = sqlx::query_as::<_, HelpOrderRow>(
            r#"
            SELECT id, student_id, question, answer, answer_at, created_at, updated_at
            FROM help_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<HelpOrderRow>> {
        let orders = sqlx::query_as::<_, HelpOrderRow>(
            r#"
            SELECT id, student_id, question, answer, answer_at, created_at, updated_at
            FROM help_orders
            WHERE student_id = $1
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn find_unanswered(&self) -> DbResult<Vec<PendingHelpOrderRow>> {
        let orders = sqlx::query_as::<_, PendingHelpOrderRow>(
            r#"
            SELECT h.id, h.question, h.created_at,
                   s.id AS student_id, s.name AS student_name
            FROM help_orders h
            JOIN students s ON s.id = h.student_id
            WHERE h.answer_at IS NULL
            ORDER BY h.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn create(&self, student_id: i64, question: &str) -> DbResult<HelpOrderRow> {
        let row = sqlx::query_as::<_, HelpOrderRow>(
            r#"
            INSERT INTO help_orders (student_id, question)
            VALUES ($1, $2)
            RETURNING id, student_id, question, answer, answer_at, created_at, updated_at
            "#,
        )
        .bind(student_id)
        .bind(question)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn answer(
        &self,
        id: i64,
        answer: &str,
        answered_at: DateTime<Utc>,
    ) -> DbResult<Option<HelpOrderRow>> {
        let row = sqlx::query_as::<_, HelpOrderRow>(
            r#"
            UPDATE help_orders
            SET answer = $1, answer_at = $2, updated_at = NOW()
            WHERE id = $3 AND answer_at IS NULL
            RETURNING id, student_id, question, answer, answer_at, created_at, updated_at
            "#,
        )
        .bind(answer)
        .bind(answered_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
