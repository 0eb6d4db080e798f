//! PostgreSQL student repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::StudentRow;
use crate::repo::StudentRepository;

/// PostgreSQL student repository
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    /// Create a new student repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<StudentRow>> {
        let student = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, email FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }
}
