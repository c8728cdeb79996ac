//! Handler for the admin seller dashboard.

use axum::extract::{Query, State};
use axum::Json;
use habitat_core::dashboard::{SellerDashboard, TRANSACTION_SORT_KEYS};
use habitat_core::pagination::Direction;
use habitat_db::repositories::SellerDashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::state::AppState;

/// GET /api/sellers/dashboard
///
/// Paging and sort errors are returned to the client. Database failures are
/// logged and answered with an empty dashboard for the requested page.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(params): Query<PageParams>,
) -> AppResult<Json<SellerDashboard>> {
    let page = params.to_request(TRANSACTION_SORT_KEYS, Direction::Desc)?;

    let dashboard = match SellerDashboardRepo::load(&state.pool, &page).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!(error = %e, page = page.page, size = page.size, "Seller dashboard query failed");
            SellerDashboard::empty(page.page, page.size)
        }
    };
    Ok(Json(dashboard))
}
