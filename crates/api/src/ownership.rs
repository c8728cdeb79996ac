//! Project ownership checks.
//!
//! Role checks happen in the [`crate::middleware::rbac`] extractors. Once a
//! handler knows which project a request touches, these helpers decide whether
//! the caller may act on it: admins always may, sellers only on projects they
//! own. A seller is identified by the phone number carried in the token.

use habitat_core::error::CoreError;
use habitat_core::types::DbId;
use habitat_db::models::block::Block;
use habitat_db::models::project::Project;
use habitat_db::models::seller::Seller;
use habitat_db::repositories::{BlockRepo, ProjectRepo, SellerRepo};
use habitat_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Look up the seller record behind a `SELLER` token.
pub async fn resolve_seller(pool: &DbPool, user: &AuthUser) -> AppResult<Seller> {
    if user.phone.is_empty() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Token carries no phone number".into(),
        )));
    }
    SellerRepo::find_by_phone(pool, &user.phone)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No seller is registered for this account".into(),
            ))
        })
}

/// Load a live project or fail with 404.
pub async fn load_project(pool: &DbPool, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Load a project the caller is allowed to modify.
pub async fn ensure_project_write(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> AppResult<Project> {
    let project = load_project(pool, project_id).await?;
    if user.is_admin() {
        return Ok(project);
    }
    if user.is_seller() {
        let seller = resolve_seller(pool, user).await?;
        if project.seller_id == Some(seller.id) {
            return Ok(project);
        }
        tracing::warn!(
            project_id,
            seller_id = seller.id,
            "Seller attempted to modify a project they do not own"
        );
    }
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Not allowed to modify project {project_id}"
    ))))
}

/// Load a project the caller is allowed to read.
///
/// Sellers only see their own projects; every other role sees all of them.
pub async fn ensure_project_read(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> AppResult<Project> {
    if user.is_seller() {
        return ensure_project_write(pool, user, project_id).await;
    }
    load_project(pool, project_id).await
}

/// Load a block whose project the caller is allowed to modify.
pub async fn ensure_block_write(
    pool: &DbPool,
    user: &AuthUser,
    block_id: DbId,
) -> AppResult<Block> {
    let block = BlockRepo::find_by_id(pool, block_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Block",
            id: block_id,
        }))?;
    ensure_project_write(pool, user, block.project_id).await?;
    Ok(block)
}

/// Decide which seller owns a project being written.
///
/// Sellers always write their own projects. Admins may name any live seller
/// or leave the project unassigned.
pub async fn owner_for_write(
    pool: &DbPool,
    user: &AuthUser,
    requested: Option<DbId>,
) -> AppResult<Option<DbId>> {
    if user.is_seller() {
        return Ok(Some(resolve_seller(pool, user).await?.id));
    }
    match requested {
        Some(seller_id) => {
            SellerRepo::find_by_id(pool, seller_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Seller",
                    id: seller_id,
                }))?;
            Ok(Some(seller_id))
        }
        None => Ok(None),
    }
}
