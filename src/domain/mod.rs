//! Domain layer - Core business entities and rules.
//!
//! Contains the employee entity, its write requests, the credential
//! hashing boundary and field validation. Nothing here touches HTTP or
//! the database.

mod employee;
mod password;
pub mod validation;

pub use employee::{
    CreateEmployee, Employee, EmployeeResponse, NewEmployee, UniqueField, UpdateEmployee,
};
pub use password::{Argon2Hasher, CredentialHasher};
pub use validation::FieldViolation;
