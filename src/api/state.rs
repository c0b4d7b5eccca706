//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::HasherSettings;
use crate::domain::Argon2Hasher;
use crate::errors::AppResult;
use crate::infra::{Database, EmployeeRepository, EmployeeStore};
use crate::services::{Directory, DirectoryService};

/// Application state (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Employee directory
    pub directory: Arc<dyn DirectoryService>,
    /// Database handle, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create state from an already wired directory.
    pub fn new(directory: Arc<dyn DirectoryService>, database: Option<Arc<Database>>) -> Self {
        Self {
            directory,
            database,
        }
    }

    /// Wire a Postgres-backed directory.
    pub fn with_database(database: Arc<Database>, hasher: HasherSettings) -> AppResult<Self> {
        let repo: Arc<dyn EmployeeRepository> =
            Arc::new(EmployeeStore::new(database.connection()));
        Ok(Self::new(
            Self::directory(repo, hasher)?,
            Some(database),
        ))
    }

    /// Wire a directory over any repository, with no database to ping.
    pub fn with_repository(
        repo: Arc<dyn EmployeeRepository>,
        hasher: HasherSettings,
    ) -> AppResult<Self> {
        Ok(Self::new(Self::directory(repo, hasher)?, None))
    }

    fn directory(
        repo: Arc<dyn EmployeeRepository>,
        hasher: HasherSettings,
    ) -> AppResult<Arc<dyn DirectoryService>> {
        let hasher = Arc::new(Argon2Hasher::new(hasher)?);
        Ok(Arc::new(Directory::new(repo, hasher)))
    }
}
