//! Student types

use serde::{Deserialize, Serialize};

use crate::StudentId;

/// A gym student, owned by the student registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student ID
    pub id: StudentId,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
}

impl Student {
    /// Mailbox string in `Name <email>` form
    pub fn mailbox(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// Minimal student projection attached to listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
}
