//! Unit entity model and DTOs.

use habitat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A unit row from the `units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    pub id: DbId,
    pub block_id: DbId,
    pub unit_type_id: DbId,
    pub unit_number: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_by: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a unit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUnit {
    pub id: Option<DbId>,
    pub block_id: DbId,
    pub unit_type_id: DbId,
    #[validate(length(min = 1, max = 20))]
    pub unit_number: String,
}

/// DTO for merge-patching a unit. The owning block cannot be changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUnit {
    pub id: Option<DbId>,
    pub unit_type_id: Option<DbId>,
    #[validate(length(min = 1, max = 20))]
    pub unit_number: Option<String>,
}
