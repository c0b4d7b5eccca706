//! Directory service - uniqueness and merge protocol for employee writes.
//!
//! Every write runs the login/email pre-checks here for a precise error,
//! then relies on the repository's own constraint for races between
//! concurrent writers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    CreateEmployee, CredentialHasher, Employee, NewEmployee, UniqueField, UpdateEmployee,
};
use crate::errors::{AppError, AppResult};
use crate::infra::EmployeeRepository;

/// Directory service trait for dependency injection.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Every employee, ordered by id
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;

    /// Employee by id, `None` when absent
    async fn find_employee(&self, id: i64) -> AppResult<Option<Employee>>;

    /// Create an employee; login and email must be free
    async fn create_employee(&self, request: CreateEmployee) -> AppResult<Employee>;

    /// Merge `request` into an existing employee
    async fn update_employee(&self, id: i64, request: UpdateEmployee) -> AppResult<Employee>;

    /// Delete by id; deleting an absent id succeeds
    async fn delete_employee(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of DirectoryService.
pub struct Directory {
    repo: Arc<dyn EmployeeRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl Directory {
    pub fn new(repo: Arc<dyn EmployeeRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Fail if `login` belongs to an employee other than `owner`.
    async fn ensure_login_free(&self, login: &str, owner: Option<i64>) -> AppResult<()> {
        match self.repo.find_by_login(login).await? {
            Some(holder) if Some(holder.id) != owner => {
                tracing::warn!(holder_id = holder.id, "Login already taken");
                Err(AppError::conflict(UniqueField::Login))
            }
            _ => Ok(()),
        }
    }

    /// Fail if `email` belongs to an employee other than `owner`.
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(holder) if Some(holder.id) != owner => {
                tracing::warn!(holder_id = holder.id, "Email already taken");
                Err(AppError::conflict(UniqueField::Email))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryService for Directory {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repo.find_all().await
    }

    async fn find_employee(&self, id: i64) -> AppResult<Option<Employee>> {
        self.repo.find_by_id(id).await
    }

    async fn create_employee(&self, request: CreateEmployee) -> AppResult<Employee> {
        // Login first: it decides the message when both collide
        self.ensure_login_free(&request.login, None).await?;
        self.ensure_email_free(&request.email, None).await?;

        let plaintext = Some(request.password.as_str()).filter(|p| !p.is_empty());
        let password_hash = self.hasher.hash(plaintext)?;

        let employee = self
            .repo
            .save(NewEmployee {
                first_name: request.first_name,
                last_name: request.last_name,
                middle_name: request.middle_name,
                login: request.login,
                email: request.email,
                password_hash,
            })
            .await?;

        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    async fn update_employee(&self, id: i64, request: UpdateEmployee) -> AppResult<Employee> {
        let current = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        let mut merged = current.merged_with(&request);

        // Unchanged values can't collide with anyone but this record
        if merged.login != current.login {
            self.ensure_login_free(&merged.login, Some(id)).await?;
        }
        if merged.email != current.email {
            self.ensure_email_free(&merged.email, Some(id)).await?;
        }

        if let Some(password) = request.new_password() {
            merged.password_hash = self.hasher.hash(Some(password))?;
        }

        let employee = self.repo.update(merged).await?;

        tracing::info!(employee_id = employee.id, "Employee updated");
        Ok(employee)
    }

    async fn delete_employee(&self, id: i64) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}
