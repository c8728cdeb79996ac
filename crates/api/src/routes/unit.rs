//! Route definitions for the `/units` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::unit;
use crate::state::AppState;

/// Routes mounted at `/units`.
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
        .route("/", get(unit::list).post(unit::create))
        .route(
            "/{id}",
            get(unit::get_by_id)
                .put(unit::replace)
                .patch(unit::patch)
                .delete(unit::delete),
        )
}
