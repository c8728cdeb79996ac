//! Project entity model and DTOs.

use habitat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub seller_id: Option<DbId>,
    pub name: String,
    pub address: Option<String>,
    pub status: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_by: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub id: Option<DbId>,
    /// Ignored for sellers, who always own the projects they write.
    pub seller_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// Defaults to `ACTIVE` if omitted.
    pub status: Option<String>,
}

/// DTO for merge-patching a project. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    pub id: Option<DbId>,
    pub seller_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub status: Option<String>,
}
