//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//!
//! Every table is created with its `is_active` / `deleted_at` / `updated_at`
//! lifecycle columns and declares foreign keys inline, so SQLite enforces
//! the same `ON DELETE` actions as Postgres. Those actions come from
//! `domain::Relation::on_delete`.

use domain::{OnDelete, Relation};
use sea_orm_migration::prelude::*;

mod m20240531_000001_create_users_table;
mod m20240531_000002_create_regions_and_cafes;
mod m20240606_000001_create_reviews_and_likes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240531_000001_create_users_table::Migration),
            Box::new(m20240531_000002_create_regions_and_cafes::Migration),
            Box::new(m20240606_000001_create_reviews_and_likes::Migration),
        ]
    }
}

/// Foreign key action for the relation's child column
fn referential_action(relation: Relation) -> ForeignKeyAction {
    match relation.on_delete() {
        OnDelete::Cascade => ForeignKeyAction::Cascade,
        OnDelete::SetNull => ForeignKeyAction::SetNull,
    }
}
