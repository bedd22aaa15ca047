//! Rewrites meal owner references into the canonical typed encoding.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::meal_service::map_repository_error;
use crate::domain::ports::{MealRepository, OwnerRefRepair, RepairReport};
use crate::domain::{Error, OwnerRef, normalize};

/// Implements [`OwnerRefRepair`] over the meal store.
///
/// Each rewrite is a single-document write, so a run interrupted part way
/// leaves every record in one encoding or the other and can simply be
/// repeated.
#[derive(Clone)]
pub struct OwnerRefRepairService<R> {
    meal_repo: Arc<R>,
}

impl<R> OwnerRefRepairService<R> {
    pub fn new(meal_repo: Arc<R>) -> Self {
        Self { meal_repo }
    }
}

#[async_trait]
impl<R> OwnerRefRepair for OwnerRefRepairService<R>
where
    R: MealRepository,
{
    async fn repair(&self) -> Result<RepairReport, Error> {
        let meals = self
            .meal_repo
            .find_all()
            .await
            .map_err(map_repository_error)?;

        let mut report = RepairReport::default();
        for meal in meals {
            report.scanned += 1;
            if meal.owner().is_canonical() {
                continue;
            }
            let owner = match normalize(meal.owner()) {
                Ok(owner) => owner,
                Err(err) => {
                    warn!(meal_id = %meal.id(), error = %err, "leaving malformed owner reference");
                    report.invalid += 1;
                    continue;
                }
            };
            let replaced = self
                .meal_repo
                .replace_owner(&meal.id(), &OwnerRef::from(owner))
                .await
                .map_err(map_repository_error)?;
            if replaced {
                report.rewritten += 1;
            }
        }

        info!(
            scanned = report.scanned,
            rewritten = report.rewritten,
            invalid = report.invalid,
            "owner reference repair finished"
        );
        Ok(report)
    }
}
