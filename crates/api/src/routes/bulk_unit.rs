//! Route definitions for bulk unit creation.

use axum::routing::post;
use axum::Router;

use crate::handlers::bulk_unit;
use crate::state::AppState;

/// Routes mounted at `/bulk-unit-creation`. The version lives in the path.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/units", post(bulk_unit::create_units))
}
