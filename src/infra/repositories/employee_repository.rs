//! Employee repository: the storage side of the directory.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, Unchanged,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use crate::domain::{Employee, NewEmployee, UniqueField};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
///
/// Implementations must enforce login and email uniqueness themselves and
/// report a violation as [`AppError::Conflict`], even when the caller
/// already checked.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, ordered by id ascending
    async fn find_all(&self) -> AppResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>>;

    /// Exact, case-sensitive login match
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Employee>>;

    /// Exact, case-sensitive email match
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Insert and return the record with its assigned id
    async fn save(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// Overwrite every field of an existing record
    async fn update(&self, employee: Employee) -> AppResult<Employee>;

    /// Remove by id; absent ids are ignored
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Postgres-backed implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations become conflicts; everything else stays a
/// database error.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            let field = UniqueField::from_constraint(&detail);
            tracing::warn!(%field, "Unique constraint rejected employee write");
            AppError::conflict(field)
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Employee::from))
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Login.eq(login))
            .one(&self.db)
            .await?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(Employee::from))
    }

    async fn save(&self, employee: NewEmployee) -> AppResult<Employee> {
        let active_model = ActiveModel {
            id: NotSet,
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            middle_name: Set(employee.middle_name),
            login: Set(employee.login),
            email: Set(employee.email),
            password_hash: Set(employee.password_hash),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        Ok(Employee::from(model))
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let active_model = ActiveModel {
            id: Unchanged(employee.id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            middle_name: Set(employee.middle_name),
            login: Set(employee.login),
            email: Set(employee.email),
            password_hash: Set(employee.password_hash),
        };

        match active_model.update(&self.db).await {
            Ok(model) => Ok(Employee::from(model)),
            // Row deleted between the directory's lookup and this write
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(write_error(e)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            tracing::debug!(employee_id = id, "Delete of absent employee ignored");
        }

        Ok(())
    }
}
