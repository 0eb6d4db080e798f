//! REST API handlers

pub mod checkins;
pub mod enrollments;
pub mod health;
pub mod help_orders;
pub mod plans;
pub mod shared;

pub use checkins::*;
pub use enrollments::*;
pub use health::*;
pub use help_orders::*;
pub use plans::*;
