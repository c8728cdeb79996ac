use crate::types::DbId;

/// Error key: a create request carried an id.
pub const KEY_ID_EXISTS: &str = "idexists";
/// Error key: an update request carried no id.
pub const KEY_ID_NULL: &str = "idnull";
/// Error key: the body id does not match the path id.
pub const KEY_ID_INVALID: &str = "idinvalid";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A client error tied to an entity and a stable error key
    /// (e.g. `idexists`, `idnull`, `idinvalid`).
    #[error("{message}")]
    BadRequestAlert {
        entity: &'static str,
        key: &'static str,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::BadRequestAlert`].
    pub fn alert(entity: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequestAlert {
            entity,
            key,
            message: message.into(),
        }
    }
}

/// Reject a create request whose body already carries an id.
pub fn ensure_new(entity: &'static str, body_id: Option<DbId>) -> Result<(), CoreError> {
    match body_id {
        Some(_) => Err(CoreError::alert(
            entity,
            KEY_ID_EXISTS,
            format!("A new {entity} cannot already have an ID"),
        )),
        None => Ok(()),
    }
}

/// Check that an update body names the same row as the request path.
pub fn ensure_matching_id(
    entity: &'static str,
    path_id: DbId,
    body_id: Option<DbId>,
) -> Result<(), CoreError> {
    match body_id {
        None => Err(CoreError::alert(entity, KEY_ID_NULL, "Invalid id")),
        Some(id) if id != path_id => Err(CoreError::alert(entity, KEY_ID_INVALID, "Invalid ID")),
        Some(_) => Ok(()),
    }
}

/// Convert `validator` failures into a [`CoreError::Validation`].
impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
