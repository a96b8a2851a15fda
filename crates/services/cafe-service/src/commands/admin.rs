//! Admin command - bulk lifecycle actions.

use std::sync::Arc;

use crate::cli::args::{AdminAction, AdminArgs};
use crate::config::CafeServiceConfig;
use crate::infra::{Database, Persistence};
use crate::service::{AdminManager, AdminService, BatchOutcome};
use common::{AppError, AppResult};

/// Execute the admin command
pub async fn execute(args: AdminArgs, config: CafeServiceConfig) -> AppResult<()> {
    let db = Database::connect(&config.database)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let service = AdminManager::new(Arc::new(Persistence::new(db.get_connection())));

    match args.action {
        AdminAction::Delete(batch) => {
            report(service.soft_delete(batch.kind, batch.ids).await?);
        }
        AdminAction::Restore(batch) => {
            report(service.restore(batch.kind, batch.ids).await?);
        }
        AdminAction::HardDelete(batch) => {
            report(service.hard_delete(batch.kind, batch.ids).await?);
        }
        AdminAction::Inactive { kind } => {
            let records = service.list_inactive(kind).await?;
            let rendered = serde_json::to_string_pretty(&records)
                .map_err(|e| AppError::internal(e.to_string()))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn report(outcome: BatchOutcome) {
    println!(
        "{} {} {} record(s), {} dependent row(s) updated",
        outcome.action, outcome.records, outcome.kind, outcome.cascaded
    );
}
