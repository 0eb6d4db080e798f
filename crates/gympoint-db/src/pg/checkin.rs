//! PostgreSQL check-in repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::CheckinRow;
use crate::repo::{CheckinAdmission, CheckinRepository};

/// PostgreSQL check-in repository
#[derive(Clone)]
pub struct PgCheckinRepository {
    pool: PgPool,
}

impl PgCheckinRepository {
    /// Create a new check-in repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckinRepository for PgCheckinRepository {
    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<CheckinRow>> {
        let checkins = sqlx::query_as::<_, CheckinRow>(
            r#"
            SELECT id, student_id, created_at
            FROM checkins
            WHERE student_id = $1
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checkins)
    }

    async fn admit(
        &self,
        student_id: i64,
        window_start: DateTime<Utc>,
        limit: i64,
        now: DateTime<Utc>,
    ) -> DbResult<CheckinAdmission> {
        let mut tx = self.pool.begin().await?;

        // Locking the student row serializes concurrent admissions for them.
        let locked: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM students WHERE id = $1 FOR UPDATE")
                .bind(student_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Err(DbError::NotFound);
        }

        let (recent,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM checkins WHERE student_id = $1 AND created_at >= $2",
        )
        .bind(student_id)
        .bind(window_start)
        .fetch_one(&mut *tx)
        .await?;

        if recent >= limit {
            tx.rollback().await?;
            return Ok(CheckinAdmission::Rejected { recent });
        }

        let row = sqlx::query_as::<_, CheckinRow>(
            r#"
            INSERT INTO checkins (student_id, created_at)
            VALUES ($1, $2)
            RETURNING id, student_id, created_at
            "#,
        )
        .bind(student_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CheckinAdmission::Admitted(row))
    }
}
