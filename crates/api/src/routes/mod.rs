pub mod block;
pub mod bulk_unit;
pub mod health;
pub mod project;
pub mod seller;
pub mod unit;
pub mod unit_type;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /sellers                              CRUD + /dashboard (admin)
/// /projects                             CRUD, sellers scoped to their own
/// /blocks                               CRUD, ?project_id=
/// /unit-types                           CRUD (admin writes)
/// /units                                CRUD, ?block_id=
/// /bulk-unit-creation/v1/units          POST
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sellers", seller::router())
        .nest("/projects", project::router())
        .nest("/blocks", block::router())
        .nest("/unit-types", unit_type::router())
        .nest("/units", unit::router())
        .nest("/bulk-unit-creation", bulk_unit::router())
}
