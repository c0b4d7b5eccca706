//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Employee repositories (Postgres and in-memory)

pub mod db;
pub mod repositories;

pub use db::{Database, MigrationState, Migrator, Schema};
pub use repositories::{EmployeeRepository, EmployeeStore, InMemoryEmployeeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockEmployeeRepository;
