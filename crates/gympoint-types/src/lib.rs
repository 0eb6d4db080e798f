//! Gympoint Types - Shared domain types
//!
//! This crate contains domain types used across Gympoint services:
//! - Typed record identifiers
//! - Plans, students and enrollments
//! - Check-ins and help orders

pub mod checkin;
pub mod enrollment;
pub mod error;
pub mod help_order;
pub mod id;
pub mod plan;
pub mod student;

pub use checkin::*;
pub use enrollment::*;
pub use error::*;
pub use help_order::*;
pub use id::*;
pub use plan::*;
pub use student::*;
