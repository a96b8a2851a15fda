//! Service layer - use cases over the repositories.

mod admin_service;
mod catalog_service;

pub use admin_service::{parse_keys, AdminManager, AdminService, BatchOutcome};
pub use catalog_service::{CafeDetail, CatalogManager, CatalogService, ReviewEntry};
