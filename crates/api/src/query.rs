//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use habitat_core::error::CoreError;
use habitat_core::pagination::{Direction, PageRequest};
use habitat_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?page=&size=&sort=field,dir`).
///
/// Validated into a [`PageRequest`] against the endpoint's sort whitelist.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Validate against `allowed` sort keys; the first key is the default.
    pub fn to_request(
        &self,
        allowed: &[(&str, &'static str)],
        default_direction: Direction,
    ) -> Result<PageRequest, CoreError> {
        PageRequest::parse(
            self.page,
            self.size,
            self.sort.as_deref(),
            allowed,
            default_direction,
        )
    }
}

/// `?project_id=` filter for block lists.
#[derive(Debug, Deserialize)]
pub struct ProjectFilter {
    pub project_id: Option<DbId>,
}

/// `?block_id=` filter for unit lists.
#[derive(Debug, Deserialize)]
pub struct BlockFilter {
    pub block_id: Option<DbId>,
}
