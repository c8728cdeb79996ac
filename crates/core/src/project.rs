//! Project status values.

use crate::error::CoreError;

pub const PROJECT_STATUS_ACTIVE: &str = "ACTIVE";
pub const PROJECT_STATUS_INACTIVE: &str = "INACTIVE";

const ALL_PROJECT_STATUSES: &[&str] = &[PROJECT_STATUS_ACTIVE, PROJECT_STATUS_INACTIVE];

/// Validate that a project status string is recognized.
pub fn validate_project_status(status: &str) -> Result<(), CoreError> {
    if ALL_PROJECT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown project status: '{status}'. Valid statuses: {}",
            ALL_PROJECT_STATUSES.join(", ")
        )))
    }
}
