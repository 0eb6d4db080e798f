//! Gympoint Core - Gym membership business logic
//!
//! Business rules behind the Gympoint API: the plan catalog, the enrollment
//! rule engine, the weekly check-in limiter, and the help-order flow with its
//! e-mail notifications.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gympoint_core::{CheckinService, RulesConfig};
//! use gympoint_db::Repositories;
//!
//! let repos = Repositories::new(pool);
//! let checkins = CheckinService::new(
//!     Arc::new(repos.students.clone()),
//!     Arc::new(repos.checkins.clone()),
//!     RulesConfig::default(),
//! );
//!
//! // Fails with GymError::CheckinLimitExceeded on the sixth visit in a week
//! let checkin = checkins.check_in(StudentId(1)).await?;
//! ```

pub mod checkin;
pub mod config;
pub mod enrollment;
pub mod error;
pub mod help_order;
pub mod mail_relay;
pub mod notifier;
pub mod plan;
pub mod templates;
mod validation;

pub use checkin::CheckinService;
pub use config::{MailConfig, RulesConfig};
pub use enrollment::{
    enrollment_terms, parse_start_date, EnrollmentPatch, EnrollmentService, NewEnrollment,
};
pub use error::GymError;
pub use help_order::{AnswerHelpOrder, HelpOrderService, NewHelpOrder};
pub use mail_relay::HttpMailer;
pub use notifier::{dispatch, LogMailer, Notification, Notifier, NotifyError};
pub use plan::{NewPlan, PlanCatalog, PlanPatch};
