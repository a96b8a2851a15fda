//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling with HTTP response mapping
//! - Configuration structures
//! - Pagination types

pub mod config;
pub mod error;
pub mod pagination;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
