//! Repository for the `projects` table.

use habitat_core::pagination::PageRequest;
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, seller_id, name, address, status, \
                       created_by, created_at, last_modified_by, updated_at";

/// Sort keys accepted by [`ProjectRepo::list`].
pub const SORT_KEYS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("status", "status"),
    ("createdAt", "created_at"),
];

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `seller_id`, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `ACTIVE`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        seller_id: Option<DbId>,
        actor: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (seller_id, name, address, status, created_by, last_modified_by)
             VALUES ($1, $2, $3, COALESCE($4, 'ACTIVE'), $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(seller_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.status)
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of projects, optionally restricted to one seller.
    pub async fn list(
        pool: &PgPool,
        seller_id: Option<DbId>,
        page: &PageRequest,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR seller_id = $1)
             ORDER BY {}, id LIMIT $2 OFFSET $3",
            page.sort.to_sql()
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(seller_id)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live projects, optionally restricted to one seller.
    pub async fn count(pool: &PgPool, seller_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR seller_id = $1)",
        )
        .bind(seller_id)
        .fetch_one(pool)
        .await
    }

    /// Replace every mutable field of a project, including its owner.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateProject,
        seller_id: Option<DbId>,
        actor: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                seller_id = $2,
                name = $3,
                address = $4,
                status = COALESCE($5, 'ACTIVE'),
                last_modified_by = $6
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(seller_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.status)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        actor: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                seller_id = COALESCE($2, seller_id),
                name = COALESCE($3, name),
                address = COALESCE($4, address),
                status = COALESCE($5, status),
                last_modified_by = $6
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.seller_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.status)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW(), last_modified_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
