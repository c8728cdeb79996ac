pub mod block;
pub mod bulk_unit;
pub mod project;
pub mod seller;
pub mod seller_dashboard;
pub mod unit;
pub mod unit_type;
