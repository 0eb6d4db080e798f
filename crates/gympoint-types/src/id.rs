//! Record identifiers
//!
//! Every table uses a `BIGSERIAL` primary key, so ids are positive `i64`
//! values wrapped in a newtype per record kind.

use crate::GympointError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Parse an id from a path segment; only positive integers are accepted
            pub fn parse(s: &str) -> Result<Self, GympointError> {
                match s.trim().parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(GympointError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = GympointError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(
    /// Unique student identifier
    StudentId,
    "student"
);
record_id!(
    /// Unique plan identifier
    PlanId,
    "plan"
);
record_id!(
    /// Unique enrollment identifier
    EnrollmentId,
    "enrollment"
);
record_id!(
    /// Unique check-in identifier
    CheckinId,
    "checkin"
);
record_id!(
    /// Unique help order identifier
    HelpOrderId,
    "help order"
);
