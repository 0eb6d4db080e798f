//! Gympoint DB - Database abstractions
//!
//! SQLx-based database layer for Gympoint services.
//!
//! # Example
//!
//! ```rust,ignore
//! use gympoint_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/gympoint").await?;
//! let repos = Repositories::new(pool);
//!
//! // Use repositories
//! let plan = repos.plans.find_by_id(1).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{
    create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions, MIGRATOR,
};
pub use repo::*;
