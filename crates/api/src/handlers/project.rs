//! Handlers for the `/projects` resource.
//!
//! Admins manage every project. Sellers create projects they then own and can
//! only read or modify their own.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use habitat_core::error::{ensure_matching_id, ensure_new, CoreError};
use habitat_core::pagination::Direction;
use habitat_core::project::validate_project_status;
use habitat_core::types::DbId;
use habitat_db::models::project::{CreateProject, Project, UpdateProject};
use habitat_db::repositories::project_repo::SORT_KEYS;
use habitat_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSellerOrAdmin};
use crate::ownership::{ensure_project_read, ensure_project_write, owner_for_write, resolve_seller};
use crate::query::PageParams;
use crate::response::{alert_headers, AlertHeaders, Paginated};
use crate::state::AppState;

const ENTITY: &str = "project";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        validate_project_status(status)?;
    }
    Ok(())
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, AlertHeaders, Json<Project>)> {
    ensure_new(ENTITY, input.id)?;
    input.validate()?;
    check_status(input.status.as_deref())?;

    let seller_id = owner_for_write(&state.pool, &user, input.seller_id).await?;
    let project = ProjectRepo::create(&state.pool, &input, seller_id, &user.actor()).await?;
    tracing::info!(
        project_id = project.id,
        seller_id = ?project.seller_id,
        user_id = user.user_id,
        "Project created"
    );

    Ok((
        StatusCode::CREATED,
        alert_headers(ENTITY, "created", project.id),
        Json(project),
    ))
}

/// PUT /api/projects/{id}
pub async fn replace(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProject>,
) -> AppResult<(AlertHeaders, Json<Project>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;
    check_status(input.status.as_deref())?;

    ensure_project_write(&state.pool, &user, id).await?;
    let seller_id = owner_for_write(&state.pool, &user, input.seller_id).await?;

    let project = ProjectRepo::replace(&state.pool, id, &input, seller_id, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(project)))
}

/// PATCH /api/projects/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<(AlertHeaders, Json<Project>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;
    check_status(input.status.as_deref())?;

    ensure_project_write(&state.pool, &user, id).await?;
    input.seller_id = owner_for_write(&state.pool, &user, input.seller_id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(project)))
}

/// GET /api/projects
///
/// Sellers only see the projects they own.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
) -> AppResult<Paginated<Project>> {
    let page = params.to_request(SORT_KEYS, Direction::Asc)?;
    let seller_id = if user.is_seller() {
        Some(resolve_seller(&state.pool, &user).await?.id)
    } else {
        None
    };

    let items = ProjectRepo::list(&state.pool, seller_id, &page).await?;
    let total = ProjectRepo::count(&state.pool, seller_id).await?;
    Ok(Paginated {
        items,
        total,
        page,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ensure_project_read(&state.pool, &user, id).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, AlertHeaders)> {
    ensure_project_write(&state.pool, &user, id).await?;
    if !ProjectRepo::soft_delete(&state.pool, id, &user.actor()).await? {
        return Err(not_found(id));
    }
    tracing::info!(project_id = id, user_id = user.user_id, "Project deleted");
    Ok((StatusCode::NO_CONTENT, alert_headers(ENTITY, "deleted", id)))
}
