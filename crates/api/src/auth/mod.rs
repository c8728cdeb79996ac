//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and minting for tooling/tests).

pub mod jwt;
