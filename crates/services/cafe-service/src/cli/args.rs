//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use domain::EntityKind;

/// Cafe service - catalog persistence and lifecycle administration
#[derive(Parser, Debug)]
#[command(name = "cafe-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Soft delete, restore or purge records
    Admin(AdminArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the admin command
#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub action: AdminAction,
}

/// Records addressed by a bulk action
#[derive(Args, Debug, Clone)]
pub struct Batch {
    /// Entity kind (region, cafe, review, cafe_like, review_like, user)
    #[arg(short, long)]
    pub kind: EntityKind,

    /// Primary keys of the records
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Admin actions
#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// Soft delete records and deactivate their direct dependents
    Delete(Batch),
    /// Restore records and reactivate their direct dependents
    Restore(Batch),
    /// Permanently remove records
    HardDelete(Batch),
    /// Print soft-deleted records as JSON
    Inactive {
        #[arg(short, long)]
        kind: EntityKind,
    },
}
