//! PostgreSQL repository implementations

mod checkin;
mod enrollment;
mod help_order;
mod plan;
mod student;

pub use checkin::PgCheckinRepository;
pub use enrollment::PgEnrollmentRepository;
pub use help_order::PgHelpOrderRepository;
pub use plan::PgPlanRepository;
pub use student::PgStudentRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub students: PgStudentRepository,
    pub plans: PgPlanRepository,
    pub enrollments: PgEnrollmentRepository,
    pub checkins: PgCheckinRepository,
    pub help_orders: PgHelpOrderRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            students: PgStudentRepository::new(pool.clone()),
            plans: PgPlanRepository::new(pool.clone()),
            enrollments: PgEnrollmentRepository::new(pool.clone()),
            checkins: PgCheckinRepository::new(pool.clone()),
            help_orders: PgHelpOrderRepository::new(pool),
        }
    }
}
