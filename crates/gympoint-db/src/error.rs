//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Row is still referenced by a foreign key
    #[error("record is still referenced by {0}")]
    StillReferenced(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Map a foreign-key violation into [`DbError::StillReferenced`]
    pub(crate) fn from_delete(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_foreign_key_violation() {
                let table = db_err.table().unwrap_or("another table").to_string();
                return Self::StillReferenced(table);
            }
        }
        Self::Sqlx(err)
    }
}
