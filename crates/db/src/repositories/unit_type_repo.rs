//! Repository for the `unit_types` table.

use habitat_core::pagination::PageRequest;
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::models::unit_type::{CreateUnitType, UnitType, UpdateUnitType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_by, created_at, last_modified_by, updated_at";

/// Sort keys accepted by [`UnitTypeRepo::list`].
pub const SORT_KEYS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

/// Provides CRUD operations for unit types.
pub struct UnitTypeRepo;

impl UnitTypeRepo {
    /// Insert a new unit type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUnitType,
        actor: &str,
    ) -> Result<UnitType, sqlx::Error> {
        let query = format!(
            "INSERT INTO unit_types (name, created_by, last_modified_by)
             VALUES ($1, $2, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UnitType>(&query)
            .bind(&input.name)
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a unit type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UnitType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM unit_types WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, UnitType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the id of the live unit type called `name`, creating it if needed.
    pub(crate) async fn find_or_create_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
        actor: &str,
    ) -> Result<DbId, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO unit_types (name, created_by, last_modified_by)
             VALUES ($1, $2, $2)
             ON CONFLICT (name) WHERE deleted_at IS NULL DO NOTHING
             RETURNING id",
        )
        .bind(name)
        .bind(actor)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = inserted {
            return Ok(id);
        }

        sqlx::query_scalar("SELECT id FROM unit_types WHERE name = $1 AND deleted_at IS NULL")
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// List one page of unit types.
    pub async fn list(pool: &PgPool, page: &PageRequest) -> Result<Vec<UnitType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unit_types WHERE deleted_at IS NULL
             ORDER BY {}, id LIMIT $1 OFFSET $2",
            page.sort.to_sql()
        );
        sqlx::query_as::<_, UnitType>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live unit types.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM unit_types WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// Replace the name of a unit type.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateUnitType,
        actor: &str,
    ) -> Result<Option<UnitType>, sqlx::Error> {
        let query = format!(
            "UPDATE unit_types SET name = $2, last_modified_by = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UnitType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Update a unit type. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUnitType,
        actor: &str,
    ) -> Result<Option<UnitType>, sqlx::Error> {
        let query = format!(
            "UPDATE unit_types SET name = COALESCE($2, name), last_modified_by = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UnitType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a unit type by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE unit_types SET deleted_at = NOW(), last_modified_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
