//! Plan catalog

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use gympoint_db::{DbError, PlanRepository, WritePlan};
use gympoint_types::{Plan, PlanId};

use crate::validation::{monthly_price, not_blank, total_price_fits};
use crate::GymError;

/// Input for a new plan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPlan {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(range(min = 1, message = "must be at least one month"))]
    pub duration: i32,
    #[validate(custom(function = "monthly_price"))]
    pub price: Decimal,
}

/// Partial plan update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlanPatch {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(range(min = 1, message = "must be at least one month"))]
    pub duration: Option<i32>,
    #[validate(custom(function = "monthly_price"))]
    pub price: Option<Decimal>,
}

/// Staff-managed catalog of plans
pub struct PlanCatalog<P: PlanRepository> {
    plans: Arc<P>,
}

impl<P: PlanRepository> PlanCatalog<P> {
    /// Create a new plan catalog
    pub fn new(plans: Arc<P>) -> Self {
        Self { plans }
    }

    /// List every plan
    pub async fn list(&self) -> Result<Vec<Plan>, GymError> {
        let rows = self.plans.list().await?;
        Ok(rows.into_iter().map(Plan::from).collect())
    }

    /// Look up a single plan
    pub async fn get(&self, id: PlanId) -> Result<Plan, GymError> {
        self.plans
            .find_by_id(id.0)
            .await?
            .map(Plan::from)
            .ok_or(GymError::PlanNotFound)
    }

    /// Add a plan to the catalog
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewPlan) -> Result<Plan, GymError> {
        input.validate()?;
        total_price_fits(input.duration, input.price)?;

        let row = self
            .plans
            .create(WritePlan {
                title: input.title.trim().to_string(),
                duration: input.duration,
                price: input.price,
            })
            .await?;

        info!(plan_id = row.id, "Plan created");
        Ok(row.into())
    }

    /// Change some fields of a plan.
    ///
    /// Existing enrollments keep the price and end date they were written with.
    #[instrument(skip(self, patch), fields(plan_id = %id))]
    pub async fn update(&self, id: PlanId, patch: PlanPatch) -> Result<Plan, GymError> {
        patch.validate()?;

        let current = self.get(id).await?;
        let merged = WritePlan {
            title: patch
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or(current.title),
            duration: patch.duration.unwrap_or(current.duration),
            price: patch.price.unwrap_or(current.price),
        };
        total_price_fits(merged.duration, merged.price)?;

        let row = self.plans.update(id.0, merged).await.map_err(|e| match e {
            DbError::NotFound => GymError::PlanNotFound,
            other => other.into(),
        })?;

        Ok(row.into())
    }

    /// Remove a plan that no enrollment references
    #[instrument(skip(self), fields(plan_id = %id))]
    pub async fn delete(&self, id: PlanId) -> Result<(), GymError> {
        self.get(id).await?;

        self.plans.delete(id.0).await.map_err(|e| match e {
            DbError::NotFound => GymError::PlanNotFound,
            DbError::StillReferenced(_) => GymError::PlanInUse,
            other => other.into(),
        })?;

        info!("Plan deleted");
        Ok(())
    }
}
