//! Route definitions for the `/unit-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::unit_type;
use crate::state::AppState;

/// Routes mounted at `/unit-types`.
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
        .route("/", get(unit_type::list).post(unit_type::create))
        .route(
            "/{id}",
            get(unit_type::get_by_id)
                .put(unit_type::replace)
                .patch(unit_type::patch)
                .delete(unit_type::delete),
        )
}
