//! CLI module - Command-line interface for the cafe service.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `admin` - Bulk soft delete, restore and hard delete

pub mod args;

pub use args::{Cli, Commands};
