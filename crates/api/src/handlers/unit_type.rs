//! Handlers for the `/unit-types` resource. Writes are admin only.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use habitat_core::error::{ensure_matching_id, ensure_new, CoreError};
use habitat_core::pagination::Direction;
use habitat_core::types::DbId;
use habitat_db::models::unit_type::{CreateUnitType, UnitType, UpdateUnitType};
use habitat_db::repositories::unit_type_repo::SORT_KEYS;
use habitat_db::repositories::UnitTypeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PageParams;
use crate::response::{alert_headers, AlertHeaders, Paginated};
use crate::state::AppState;

const ENTITY: &str = "unitType";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "UnitType",
        id,
    })
}

/// POST /api/unit-types
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<CreateUnitType>,
) -> AppResult<(StatusCode, AlertHeaders, Json<UnitType>)> {
    ensure_new(ENTITY, input.id)?;
    input.validate()?;

    let unit_type = UnitTypeRepo::create(&state.pool, &input, &user.actor()).await?;
    Ok((
        StatusCode::CREATED,
        alert_headers(ENTITY, "created", unit_type.id),
        Json(unit_type),
    ))
}

/// PUT /api/unit-types/{id}
pub async fn replace(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateUnitType>,
) -> AppResult<(AlertHeaders, Json<UnitType>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let unit_type = UnitTypeRepo::replace(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(unit_type)))
}

/// PATCH /api/unit-types/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUnitType>,
) -> AppResult<(AlertHeaders, Json<UnitType>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let unit_type = UnitTypeRepo::update(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(unit_type)))
}

/// GET /api/unit-types
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
) -> AppResult<Paginated<UnitType>> {
    let page = params.to_request(SORT_KEYS, Direction::Asc)?;
    let items = UnitTypeRepo::list(&state.pool, &page).await?;
    let total = UnitTypeRepo::count(&state.pool).await?;
    Ok(Paginated {
        items,
        total,
        page,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}

/// GET /api/unit-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<UnitType>> {
    let unit_type = UnitTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(unit_type))
}

/// DELETE /api/unit-types/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, AlertHeaders)> {
    if UnitTypeRepo::soft_delete(&state.pool, id, &user.actor()).await? {
        Ok((StatusCode::NO_CONTENT, alert_headers(ENTITY, "deleted", id)))
    } else {
        Err(not_found(id))
    }
}
