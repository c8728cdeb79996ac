//! Handlers for the `/sellers` resource. Admin only.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use habitat_core::error::{ensure_matching_id, ensure_new, CoreError};
use habitat_core::pagination::Direction;
use habitat_core::types::DbId;
use habitat_db::models::seller::{CreateSeller, Seller, UpdateSeller};
use habitat_db::repositories::seller_repo::SORT_KEYS;
use habitat_db::repositories::SellerRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{alert_headers, AlertHeaders, Paginated};
use crate::state::AppState;

const ENTITY: &str = "seller";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Seller",
        id,
    })
}

/// POST /api/sellers
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<CreateSeller>,
) -> AppResult<(StatusCode, AlertHeaders, Json<Seller>)> {
    ensure_new(ENTITY, input.id)?;
    input.validate()?;

    let seller = SellerRepo::create(&state.pool, &input, &user.actor()).await?;
    tracing::info!(seller_id = seller.id, user_id = user.user_id, "Seller created");

    Ok((
        StatusCode::CREATED,
        alert_headers(ENTITY, "created", seller.id),
        Json(seller),
    ))
}

/// PUT /api/sellers/{id}
pub async fn replace(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSeller>,
) -> AppResult<(AlertHeaders, Json<Seller>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let seller = SellerRepo::replace(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(seller)))
}

/// PATCH /api/sellers/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSeller>,
) -> AppResult<(AlertHeaders, Json<Seller>)> {
    ensure_matching_id(ENTITY, id, input.id)?;
    input.validate()?;

    let seller = SellerRepo::update(&state.pool, id, &input, &user.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((alert_headers(ENTITY, "updated", id), Json(seller)))
}

/// GET /api/sellers
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
) -> AppResult<Paginated<Seller>> {
    let page = params.to_request(SORT_KEYS, Direction::Asc)?;
    let items = SellerRepo::list(&state.pool, &page).await?;
    let total = SellerRepo::count(&state.pool).await?;
    Ok(Paginated {
        items,
        total,
        page,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}

/// GET /api/sellers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Seller>> {
    let seller = SellerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(seller))
}

/// DELETE /api/sellers/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, AlertHeaders)> {
    if SellerRepo::soft_delete(&state.pool, id, &user.actor()).await? {
        tracing::info!(seller_id = id, user_id = user.user_id, "Seller deleted");
        Ok((StatusCode::NO_CONTENT, alert_headers(ENTITY, "deleted", id)))
    } else {
        Err(not_found(id))
    }
}
