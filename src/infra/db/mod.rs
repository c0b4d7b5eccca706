//! Postgres connection for the employee store.

use std::collections::HashSet;

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

pub mod migrations;

pub use migrations::Migrator;

/// Whether opening the database also brings the schema up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Migrate,
    Untouched,
}

/// One known migration and whether the database has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Shared handle on the employees database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect to `url`, applying pending migrations when asked to.
    pub async fn open(url: &str, schema: Schema) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(url).await?;

        if schema == Schema::Migrate {
            Migrator::up(&connection, None).await.map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;
            tracing::info!("Employees schema is up to date");
        }

        Ok(Self { connection })
    }

    /// Connection handle for repositories (cheap, pooled clone).
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Roll back the most recent migration only.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Drop everything and re-apply all migrations.
    pub async fn reset(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Every migration the binary knows about, in order, with its state.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: applied.contains(m.name()),
            })
            .collect())
    }

    /// Round-trip a trivial query; used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}
