//! Block entity model and DTOs.

use habitat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A block row from the `blocks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Block {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_by: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a block.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlock {
    pub id: Option<DbId>,
    pub project_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for merge-patching a block.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlock {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
