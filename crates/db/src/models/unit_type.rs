//! Unit type entity model and DTOs.

use habitat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A unit type row from the `unit_types` table. Unit types are global.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UnitType {
    pub id: DbId,
    pub name: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_by: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a unit type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUnitType {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for merge-patching a unit type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUnitType {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
