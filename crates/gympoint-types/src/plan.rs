//! Plan catalog types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PlanId;

/// A catalog entry defining duration and monthly price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan ID
    pub id: PlanId,
    /// Display title, e.g. "Gold"
    pub title: String,
    /// Duration in months
    pub duration: i32,
    /// Monthly price
    pub price: Decimal,
    /// When the plan was created
    pub created_at: DateTime<Utc>,
    /// When the plan was last updated
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    /// Price of the whole plan: monthly price times duration
    pub fn total_price(&self) -> Decimal {
        self.price * Decimal::from(self.duration)
    }
}
