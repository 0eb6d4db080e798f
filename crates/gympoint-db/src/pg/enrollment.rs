//! PostgreSQL enrollment repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::EnrollmentRow;
use crate::repo::{EnrollmentRepository, WriteEnrollment};

/// PostgreSQL enrollment repository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    /// Create a new enrollment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn list(&self) -> DbResult<Vec<EnrollmentRow>> {
        let enrollments = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, student_id, plan_id, start_date, end_date, price,
                   created_at, updated_at
            FROM enrollments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<EnrollmentRow>> {
        let enrollment = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, student_id, plan_id, start_date, end_date, price,
                   created_at, updated_at
            FROM enrollments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    async fn create(&self, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO enrollments (student_id, plan_id, start_date, end_date, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, plan_id, start_date, end_date, price,
                      created_at, updated_at
            "#,
        )
        .bind(enrollment.student_id)
        .bind(enrollment.plan_id)
        .bind(enrollment.start_date)
        .bind(enrollment.end_date)
        .bind(enrollment.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            UPDATE enrollments
            SET student_id = $1, plan_id = $2, start_date = $3, end_date = $4,
                price = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, student_id, plan_id, start_date, end_date, price,
                      created_at, updated_at
            "#,
        )
        .bind(enrollment.student_id)
        .bind(enrollment.plan_id)
        .bind(enrollment.start_date)
        .bind(enrollment.end_date)
        .bind(enrollment.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
