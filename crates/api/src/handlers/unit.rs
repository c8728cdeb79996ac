//! Handlers for the `/units` resource.
//!
//! Write access follows the owning project: a unit belongs to a block, and the
//! block to a project.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use habitat_core::error::{ensure_matching_id, ensure_new, CoreError};
use habitat_core::pagination::Direction;
use habitat_core::types::DbId;
use habitat_db::models::unit::{CreateUnit, Unit, UpdateUnit};
use habitat_db::repositories::unit_repo::SORT_KEYS;
use habitat_db::repositories::{UnitRepo, UnitTypeRepo};
use habitat_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSellerOrAdmin};
use crate::ownership::ensure_block_write;
use crate::query::{BlockFilter, PageParams};
use crate::response::{alert_headers, AlertHeaders, Paginated};
use crate::state::AppState;

const ENTITY: &str = "unit";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Unit", id })
}

async fn ensure_unit_type(pool: &DbPool, unit_type_id: DbId) -> AppResult<()> {
    UnitTypeRepo::find_by_id(pool, unit_type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UnitType",
            id: unit_type_id,
        }))?;
    Ok(())
}

/// Load a unit whose block the caller may modify.
async fn ensure_unit_write(pool: &DbPool, user: &AuthUser, id: DbId) -> AppResult<Unit> {
    let unit = UnitRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_block_write(pool, user, unit.block_id).await?;
    Ok(unit)
}

/// POST /api/units
pub async fn create(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Json(input): Json<CreateUnit>,
) -> AppResult<(StatusCode, AlertHeaders, Json<Unit>)> {
    ensure_new(ENTITY, input.id)?;
    input.validate()?;
    ensure_block_write(&state.pool, &user, input.block_id).await?;
    ensure_unit_type(&state.pool, input.unit_type_id).await?;

    let unit = UnitRepo::create(&state.pool, &input, &user.actor()).await?;
    Ok((
        StatusCode::CREATED,
        alert_headers(ENTITY, "created", unit.id),
        Json(unit),
    ))
}

/// PUT /api/units/{id}
///
/// Moving a unit to another block requires write access to both.
pub async fn replace(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateUnit>,
) -> AppResult<(AlertHeaders, Json<Unit>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let current = ensure_unit_write(&state.pool, &user, id).await?;
    if current.block_id != input.block_id {
        ensure_block_write(&state.pool, &user, input.block_id).await?;
    }
    ensure_unit_type(&state.pool, input.unit_type_id).await?;

    let unit = UnitRepo::replace(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(unit)))
}

/// PATCH /api/units/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUnit>,
) -> AppResult<(AlertHeaders, Json<Unit>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;
    ensure_unit_write(&state.pool, &user, id).await?;
    if let Some(unit_type_id) = input.unit_type_id {
        ensure_unit_type(&state.pool, unit_type_id).await?;
    }

    let unit = UnitRepo::update(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(unit)))
}

/// GET /api/units?block_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
    Query(filter): Query<BlockFilter>,
) -> AppResult<Paginated<Unit>> {
    let page = params.to_request(SORT_KEYS, Direction::Asc)?;
    let items = UnitRepo::list(&state.pool, filter.block_id, &page).await?;
    let total = UnitRepo::count(&state.pool, filter.block_id).await?;
    Ok(Paginated {
        items,
        total,
        page,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}

/// GET /api/units/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Unit>> {
    let unit = UnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(unit))
}

/// DELETE /api/units/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, AlertHeaders)> {
    ensure_unit_write(&state.pool, &user, id).await?;
    if !UnitRepo::soft_delete(&state.pool, id, &user.actor()).await? {
        return Err(not_found(id));
    }
    Ok((StatusCode::NO_CONTENT, alert_headers(ENTITY, "deleted", id)))
}
