//! Well-known role name constants.
//!
//! These must match the `role` claim issued by the identity service.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_SELLER: &str = "SELLER";
pub const ROLE_UNION_HEAD: &str = "UNION_HEAD";
pub const ROLE_USER: &str = "USER";

/// Every role accepted by the API.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SELLER, ROLE_UNION_HEAD, ROLE_USER];

/// Whether `role` is one of the roles the API recognises.
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
