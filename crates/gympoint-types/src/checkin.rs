//! Check-in types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CheckinId, StudentId};

/// A timestamped gym visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkin {
    /// Check-in ID
    pub id: CheckinId,
    /// Student who checked in
    pub student_id: StudentId,
    /// Server time of the visit
    pub created_at: DateTime<Utc>,
}
