//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reads exclude soft-deleted
//! rows unless the method name says otherwise.

pub mod block_repo;
pub mod bulk_unit_repo;
pub mod project_repo;
pub mod seller_dashboard_repo;
pub mod seller_repo;
pub mod unit_repo;
pub mod unit_type_repo;

pub use block_repo::BlockRepo;
pub use bulk_unit_repo::BulkUnitRepo;
pub use project_repo::ProjectRepo;
pub use seller_dashboard_repo::SellerDashboardRepo;
pub use seller_repo::SellerRepo;
pub use unit_repo::UnitRepo;
pub use unit_type_repo::UnitTypeRepo;
