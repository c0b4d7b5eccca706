//! Employee directory service
//!
//! Keeps employee records with globally unique logins and emails, stores
//! passwords only as Argon2 hashes, and serves CRUD over HTTP.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Employee entity, write requests, validation, password hashing
//! - **services**: Directory service (uniqueness and merge rules)
//! - **infra**: Database, migrations and employee repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against Postgres
//! employee-directory serve
//!
//! # Start with the in-memory store
//! employee-directory serve --storage memory
//!
//! # Run migrations
//! employee-directory migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Employee, EmployeeResponse};
pub use errors::{AppError, AppResult};
