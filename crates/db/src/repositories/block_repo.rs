//! Repository for the `blocks` table.

use habitat_core::pagination::PageRequest;
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::models::block::{Block, CreateBlock, UpdateBlock};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, name, created_by, created_at, last_modified_by, updated_at";

/// Sort keys accepted by [`BlockRepo::list`].
pub const SORT_KEYS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

/// Provides CRUD operations for blocks.
pub struct BlockRepo;

impl BlockRepo {
    /// Insert a new block, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlock,
        actor: &str,
    ) -> Result<Block, sqlx::Error> {
        let query = format!(
            "INSERT INTO blocks (project_id, name, created_by, last_modified_by)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a block by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Block>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blocks WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a block by name within a project.
    pub async fn find_by_name(
        pool: &PgPool,
        project_id: DbId,
        name: &str,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocks
             WHERE project_id = $1 AND name = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(project_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Return the id of the live block `name` in `project_id`, creating it if needed.
    pub(crate) async fn find_or_create_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
        name: &str,
        actor: &str,
    ) -> Result<DbId, sqlx::Error> {
        // A concurrent insert of the same name makes ours a no-op; the
        // follow-up read then sees the committed row.
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO blocks (project_id, name, created_by, last_modified_by)
             VALUES ($1, $2, $3, $3)
             ON CONFLICT (project_id, name) WHERE deleted_at IS NULL DO NOTHING
             RETURNING id",
        )
        .bind(project_id)
        .bind(name)
        .bind(actor)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = inserted {
            return Ok(id);
        }

        sqlx::query_scalar(
            "SELECT id FROM blocks WHERE project_id = $1 AND name = $2 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .bind(name)
        .fetch_one(&mut **tx)
        .await
    }

    /// List one page of blocks, optionally restricted to one project.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
        page: &PageRequest,
    ) -> Result<Vec<Block>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocks
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY {}, id LIMIT $2 OFFSET $3",
            page.sort.to_sql()
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(project_id)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live blocks, optionally restricted to one project.
    pub async fn count(pool: &PgPool, project_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM blocks
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR project_id = $1)",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Replace every mutable field of a block, including its project.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateBlock,
        actor: &str,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "UPDATE blocks SET project_id = $2, name = $3, last_modified_by = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Update a block. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlock,
        actor: &str,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "UPDATE blocks SET name = COALESCE($2, name), last_modified_by = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a block by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE blocks SET deleted_at = NOW(), last_modified_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
