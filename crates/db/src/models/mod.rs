//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO, used for inserts and full (PUT) replacement
//! - A `Deserialize` update DTO (all `Option` fields) for merge-patch

pub mod block;
pub mod project;
pub mod seller;
pub mod unit;
pub mod unit_type;
