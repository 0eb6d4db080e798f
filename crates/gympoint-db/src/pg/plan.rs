//! PostgreSQL plan repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::PlanRow;
use crate::repo::{PlanRepository, WritePlan};

/// PostgreSQL plan repository
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Create a new plan repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn list(&self) -> DbResult<Vec<PlanRow>> {
        let plans = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, title, duration, price, created_at, updated_at
            FROM plans
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<PlanRow>> {
        let plan = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, title, duration, price, created_at, updated_at
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn create(&self, plan: WritePlan) -> DbResult<PlanRow> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO plans (title, duration, price)
            VALUES ($1, $2, $3)
            RETURNING id, title, duration, price, created_at, updated_at
            "#,
        )
        .bind(&plan.title)
        .bind(plan.duration)
        .bind(plan.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, plan: WritePlan) -> DbResult<PlanRow> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            UPDATE plans
            SET title = $1, duration = $2, price = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, duration, price, created_at, updated_at
            "#,
        )
        .bind(&plan.title)
        .bind(plan.duration)
        .bind(plan.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
