//! Route definitions for the `/blocks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::block;
use crate::state::AppState;

/// Routes mounted at `/blocks`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> replace
/// PATCH  /{id}      -> patch
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(block::list).post(block::create))
        .route(
            "/{id}",
            get(block::get_by_id)
                .put(block::replace)
                .patch(block::patch)
                .delete(block::delete),
        )
}
