//! Repository for the `units` table.

use habitat_core::pagination::PageRequest;
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::models::unit::{CreateUnit, Unit, UpdateUnit};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, block_id, unit_type_id, unit_number, \
                       created_by, created_at, last_modified_by, updated_at";

/// Sort keys accepted by [`UnitRepo::list`].
pub const SORT_KEYS: &[(&str, &str)] = &[
    ("id", "id"),
    ("unitNumber", "unit_number"),
    ("createdAt", "created_at"),
];

/// Provides CRUD operations for units.
pub struct UnitRepo;

impl UnitRepo {
    /// Insert a new unit, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUnit, actor: &str) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (block_id, unit_type_id, unit_number, created_by, last_modified_by)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(input.block_id)
            .bind(input.unit_type_id)
            .bind(&input.unit_number)
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a unit by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Which of `numbers` already exist as live units of `block_id`.
    pub(crate) async fn existing_numbers_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        block_id: DbId,
        numbers: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT unit_number FROM units
             WHERE block_id = $1 AND unit_number = ANY($2) AND deleted_at IS NULL",
        )
        .bind(block_id)
        .bind(numbers)
        .fetch_all(&mut **tx)
        .await
    }

    /// Insert a unit unless a live one with the same number exists in the block.
    ///
    /// Returns `false` when the insert was skipped.
    pub(crate) async fn insert_if_absent_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        block_id: DbId,
        unit_type_id: DbId,
        unit_number: &str,
        actor: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO units (block_id, unit_type_id, unit_number, created_by, last_modified_by)
             VALUES ($1, $2, $3, $4, $4)
             ON CONFLICT (block_id, unit_number) WHERE deleted_at IS NULL DO NOTHING",
        )
        .bind(block_id)
        .bind(unit_type_id)
        .bind(unit_number)
        .bind(actor)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one page of units, optionally restricted to one block.
    pub async fn list(
        pool: &PgPool,
        block_id: Option<DbId>,
        page: &PageRequest,
    ) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM units
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR block_id = $1)
             ORDER BY {}, id LIMIT $2 OFFSET $3",
            page.sort.to_sql()
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(block_id)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live units, optionally restricted to one block.
    pub async fn count(pool: &PgPool, block_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM units
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR block_id = $1)",
        )
        .bind(block_id)
        .fetch_one(pool)
        .await
    }

    /// Replace every mutable field of a unit, including its block.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateUnit,
        actor: &str,
    ) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!(
            "UPDATE units SET block_id = $2, unit_type_id = $3, unit_number = $4,
                last_modified_by = $5
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .bind(input.block_id)
            .bind(input.unit_type_id)
            .bind(&input.unit_number)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Update a unit. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUnit,
        actor: &str,
    ) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!(
            "UPDATE units SET
                unit_type_id = COALESCE($2, unit_type_id),
                unit_number = COALESCE($3, unit_number),
                last_modified_by = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .bind(input.unit_type_id)
            .bind(&input.unit_number)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a unit by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE units SET deleted_at = NOW(), last_modified_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
