//! Application state for the Gympoint API service.

use std::sync::Arc;

use gympoint_core::{CheckinService, EnrollmentService, HelpOrderService, Notifier, PlanCatalog};
use gympoint_db::pg::{
    PgCheckinRepository, PgEnrollmentRepository, PgHelpOrderRepository, PgPlanRepository,
    PgStudentRepository, Repositories,
};
use gympoint_db::DbPool;

use crate::config::Config;

pub type Plans = PlanCatalog<PgPlanRepository>;
pub type Enrollments =
    EnrollmentService<PgStudentRepository, PgPlanRepository, PgEnrollmentRepository>;
pub type Checkins = CheckinService<PgStudentRepository, PgCheckinRepository>;
pub type HelpOrders = HelpOrderService<PgStudentRepository, PgHelpOrderRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<Plans>,
    pub enrollments: Arc<Enrollments>,
    pub checkins: Arc<Checkins>,
    pub help_orders: Arc<HelpOrders>,
    /// Database pool for the readiness probe
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire every service over the Postgres repositories
    pub fn new(
        repos: Repositories,
        notifier: Arc<dyn Notifier>,
        pool: DbPool,
        config: Config,
    ) -> Self {
        let students = Arc::new(repos.students);
        let plans = Arc::new(repos.plans);

        Self {
            plans: Arc::new(PlanCatalog::new(Arc::clone(&plans))),
            enrollments: Arc::new(EnrollmentService::new(
                Arc::clone(&students),
                plans,
                Arc::new(repos.enrollments),
                Arc::clone(&notifier),
            )),
            checkins: Arc::new(CheckinService::new(
                Arc::clone(&students),
                Arc::new(repos.checkins),
                config.rules.clone(),
            )),
            help_orders: Arc::new(HelpOrderService::new(
                students,
                Arc::new(repos.help_orders),
                notifier,
            )),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
