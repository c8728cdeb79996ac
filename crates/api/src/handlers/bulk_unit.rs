//! Handler for bulk unit creation.
//!
//! The whole request is validated and the caller's access to the project is
//! checked before anything is written. Items are then processed one by one;
//! a failing item is reported in the summary instead of failing the request.

use axum::extract::State;
use axum::Json;
use habitat_core::bulk_units::{plan_request, summarize, BulkUnitRequest, BulkUnitSummary};
use habitat_db::repositories::BulkUnitRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireSellerOrAdmin;
use crate::ownership::ensure_project_write;
use crate::state::AppState;

/// POST /api/bulk-unit-creation/v1/units
pub async fn create_units(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Json(request): Json<BulkUnitRequest>,
) -> AppResult<Json<BulkUnitSummary>> {
    let plan = plan_request(&request)?;
    ensure_project_write(&state.pool, &user, request.project_id).await?;

    let results =
        BulkUnitRepo::create_units(&state.pool, request.project_id, &plan, &user.actor()).await;
    let summary = summarize(request.project_id, &results);

    tracing::info!(
        project_id = request.project_id,
        user_id = user.user_id,
        items = plan.len(),
        created = summary.total_units_created,
        warnings = summary.warnings.len(),
        "Bulk unit creation finished"
    );
    Ok(Json(summary))
}
