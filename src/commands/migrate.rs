//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Schema};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config.database_url, Schema::Untouched)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            for state in db.migration_states().await? {
                let label = if state.applied { "applied" } else { "pending" };
                println!("{}: {}", state.name, label);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.reset().await?;
            tracing::info!("Schema rebuilt");
        }
    }

    Ok(())
}
