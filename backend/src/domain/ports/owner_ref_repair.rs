//! Driving port for the owner-reference repair job.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;

/// Outcome of one repair run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    /// Meals examined.
    pub scanned: u64,
    /// Meals whose owner reference was rewritten to the canonical encoding.
    pub rewritten: u64,
    /// Meals whose owner reference is malformed and was left as is.
    pub invalid: u64,
}

/// Rewrites stored owner references into the canonical encoding.
///
/// Idempotent: once every well-formed reference is canonical, a further run
/// reports `rewritten == 0`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRefRepair: Send + Sync {
    async fn repair(&self) -> Result<RepairReport, Error>;
}
