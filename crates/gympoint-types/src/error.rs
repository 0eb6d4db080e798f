//! Common error types

use thiserror::Error;

/// Common errors across Gympoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GympointError {
    /// Identifier is not a positive integer
    #[error("invalid {kind} id: {value}")]
    InvalidId {
        /// Which record the id refers to
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}
