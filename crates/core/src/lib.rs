//! Domain logic for the habitat community-management backend.
//!
//! Everything here is free of I/O so it can be unit-tested directly and
//! shared by the persistence and HTTP crates.

pub mod bulk_units;
pub mod dashboard;
pub mod error;
pub mod pagination;
pub mod project;
pub mod roles;
pub mod types;
