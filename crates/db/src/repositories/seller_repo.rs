//! Repository for the `sellers` table.

use habitat_core::pagination::PageRequest;
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::models::seller::{CreateSeller, Seller, UpdateSeller};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, phone, email, is_active, created_by, created_at, last_modified_by, updated_at";

/// Sort keys accepted by [`SellerRepo::list`].
pub const SORT_KEYS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("phone", "phone"),
    ("createdAt", "created_at"),
];

/// Provides CRUD operations for sellers.
pub struct SellerRepo;

impl SellerRepo {
    /// Insert a new seller, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSeller,
        actor: &str,
    ) -> Result<Seller, sqlx::Error> {
        let query = format!(
            "INSERT INTO sellers (name, phone, email, is_active, created_by, last_modified_by)
             VALUES ($1, $2, $3, COALESCE($4, TRUE), $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.is_active)
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a seller by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the seller account registered under a phone number.
    ///
    /// Ownership checks resolve the authenticated principal through this.
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Seller>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sellers WHERE phone = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Seller>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// List one page of sellers.
    pub async fn list(pool: &PgPool, page: &PageRequest) -> Result<Vec<Seller>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sellers WHERE deleted_at IS NULL
             ORDER BY {}, id LIMIT $1 OFFSET $2",
            page.sort.to_sql()
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live sellers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sellers WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// Replace every mutable field of a seller.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateSeller,
        actor: &str,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!(
            "UPDATE sellers SET
                name = $2,
                phone = $3,
                email = $4,
                is_active = COALESCE($5, TRUE),
                last_modified_by = $6
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.is_active)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Update a seller. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeller,
        actor: &str,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!(
            "UPDATE sellers SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                is_active = COALESCE($5, is_active),
                last_modified_by = $6
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.is_active)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a seller by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sellers SET deleted_at = NOW(), last_modified_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
