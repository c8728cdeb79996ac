//! Seller entity model and DTOs.

use habitat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A seller row from the `sellers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seller {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_by: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a seller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSeller {
    /// Must be absent on create; must match the path on replace.
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for merge-patching a seller. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSeller {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}
