//! Maintenance endpoints.
//!
//! ```text
//! POST /api/v1/admin/owner-refs/repair
//! ```

use actix_web::{post, web};
use tracing::info;

use crate::domain::ports::RepairReport;
use crate::domain::{ApiResult, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Rewrite stored owner references into the canonical encoding.
///
/// Safe to call repeatedly; a run over already-canonical data reports
/// `rewritten: 0`.
#[utoipa::path(
    post,
    path = "/api/v1/admin/owner-refs/repair",
    responses(
        (status = 200, description = "Repair report", body = RepairReport),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "repairOwnerRefs",
    security(("SessionCookie" = []))
)]
#[post("/admin/owner-refs/repair")]
pub async fn repair_owner_refs(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<RepairReport>> {
    let user_id = session.require_user_id()?;
    info!(requested_by = %user_id, "owner reference repair requested");
    let report = state.repair.repair().await?;
    Ok(web::Json(report))
}
