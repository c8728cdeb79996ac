//! Route definitions for the `/sellers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{seller, seller_dashboard};
use crate::state::AppState;

/// Routes mounted at `/sellers`.
///
/// ```text
/// GET    /dashboard -> seller_dashboard::dashboard
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> replace
/// PATCH  /{id}      -> patch
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(seller_dashboard::dashboard))
        .route("/", get(seller::list).post(seller::create))
        .route(
            "/{id}",
            get(seller::get_by_id)
                .put(seller::replace)
                .patch(seller::patch)
                .delete(seller::delete),
        )
}
