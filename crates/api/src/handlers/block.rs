//! Handlers for the `/blocks` resource.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use habitat_core::error::{ensure_matching_id, ensure_new, CoreError};
use habitat_core::pagination::Direction;
use habitat_core::types::DbId;
use habitat_db::models::block::{Block, CreateBlock, UpdateBlock};
use habitat_db::repositories::block_repo::SORT_KEYS;
use habitat_db::repositories::BlockRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSellerOrAdmin};
use crate::ownership::{ensure_block_write, ensure_project_write};
use crate::query::{PageParams, ProjectFilter};
use crate::response::{alert_headers, AlertHeaders, Paginated};
use crate::state::AppState;

const ENTITY: &str = "block";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Block", id })
}

/// POST /api/blocks
pub async fn create(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Json(input): Json<CreateBlock>,
) -> AppResult<(StatusCode, AlertHeaders, Json<Block>)> {
    ensure_new(ENTITY, input.id)?;
    input.validate()?;
    ensure_project_write(&state.pool, &user, input.project_id).await?;

    let block = BlockRepo::create(&state.pool, &input, &user.actor()).await?;
    Ok((
        StatusCode::CREATED,
        alert_headers(ENTITY, "created", block.id),
        Json(block),
    ))
}

/// PUT /api/blocks/{id}
///
/// Moving a block to another project requires write access to both.
pub async fn replace(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBlock>,
) -> AppResult<(AlertHeaders, Json<Block>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let current = ensure_block_write(&state.pool, &user, id).await?;
    if current.project_id != input.project_id {
        ensure_project_write(&state.pool, &user, input.project_id).await?;
    }

    let block = BlockRepo::replace(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(block)))
}

/// PATCH /api/blocks/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlock>,
) -> AppResult<(AlertHeaders, Json<Block>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;
    ensure_block_write(&state.pool, &user, id).await?;

    let block = BlockRepo::update(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(block)))
}

/// GET /api/blocks?project_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Paginated<Block>> {
    let page = params.to_request(SORT_KEYS, Direction::Asc)?;
    let items = BlockRepo::list(&state.pool, filter.project_id, &page).await?;
    let total = BlockRepo::count(&state.pool, filter.project_id).await?;
    Ok(Paginated {
        items,
        total,
        page,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}

/// GET /api/blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Block>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(block))
}

/// DELETE /api/blocks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, AlertHeaders)> {
    ensure_block_write(&state.pool, &user, id).await?;
    if !BlockRepo::soft_delete(&state.pool, id, &user.actor()).await? {
        return Err(not_found(id));
    }
    Ok((StatusCode::NO_CONTENT, alert_headers(ENTITY, "deleted", id)))
}
