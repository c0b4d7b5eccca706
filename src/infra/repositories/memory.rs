//! In-memory implementation of EmployeeRepository (for development/testing)

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EmployeeRepository;
use crate::domain::{Employee, NewEmployee, UniqueField};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Employee>,
    /// Last id handed out; ids are never reused, even after deletes
    last_id: i64,
}

impl Table {
    /// Same guarantee the unique indexes give in Postgres.
    fn check_unique(&self, login: &str, email: &str, except: Option<i64>) -> AppResult<()> {
        let others = self.rows.values().filter(|e| Some(e.id) != except);
        for other in others {
            if other.login == login {
                return Err(AppError::conflict(UniqueField::Login));
            }
            if other.email == email {
                return Err(AppError::conflict(UniqueField::Email));
            }
        }
        Ok(())
    }
}

/// Process-local employee store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeStore {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|e| e.login == login).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|e| e.email == email).cloned())
    }

    async fn save(&self, employee: NewEmployee) -> AppResult<Employee> {
        let mut table = self.table.write().await;
        table.check_unique(&employee.login, &employee.email, None)?;

        table.last_id += 1;
        let stored = employee.with_id(table.last_id);
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&employee.id) {
            return Err(AppError::NotFound);
        }
        table.check_unique(&employee.login, &employee.email, Some(employee.id))?;

        table.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(login: &str, email: &str) -> NewEmployee {
        NewEmployee {
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            middle_name: None,
            login: login.to_string(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let store = InMemoryEmployeeStore::new();

        let first = store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();
        let second = store.save(new_employee("petrov", "petrov@example.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryEmployeeStore::new();

        let first = store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();
        store.delete_by_id(first.id).await.unwrap();
        let second = store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_save_enforces_unique_login_and_email() {
        let store = InMemoryEmployeeStore::new();
        store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();

        let login_clash = store.save(new_employee("ivanov", "other@example.com")).await;
        assert!(matches!(login_clash, Err(AppError::Conflict(UniqueField::Login))));

        let email_clash = store.save(new_employee("other", "ivanov@example.com")).await;
        assert!(matches!(email_clash, Err(AppError::Conflict(UniqueField::Email))));

        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_uniqueness_is_case_sensitive() {
        let store = InMemoryEmployeeStore::new();
        store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();

        let result = store.save(new_employee("Ivanov", "Ivanov@example.com")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_allows_own_values() {
        let store = InMemoryEmployeeStore::new();
        let mut stored = store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();

        stored.first_name = "Пётр".to_string();
        let updated = store.update(stored).await.unwrap();

        assert_eq!(updated.first_name, "Пётр");
    }

    #[tokio::test]
    async fn test_update_rejects_other_records_values() {
        let store = InMemoryEmployeeStore::new();
        store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();
        let mut petrov = store.save(new_employee("petrov", "petrov@example.com")).await.unwrap();

        petrov.email = "ivanov@example.com".to_string();
        let result = store.update(petrov.clone()).await;

        assert!(matches!(result, Err(AppError::Conflict(UniqueField::Email))));
        let unchanged = store.find_by_id(petrov.id).await.unwrap().unwrap();
        assert_eq!(unchanged.email, "petrov@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryEmployeeStore::new();
        let ghost = new_employee("ghost", "ghost@example.com").with_id(42);

        let result = store.update(ghost).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let store = InMemoryEmployeeStore::new();
        for login in ["cccc", "aaaa", "bbbb"] {
            store
                .save(new_employee(login, &format!("{}@example.com", login)))
                .await
                .unwrap();
        }

        let ids: Vec<i64> = store.find_all().await.unwrap().iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let store = InMemoryEmployeeStore::new();
        store.save(new_employee("ivanov", "ivanov@example.com")).await.unwrap();

        assert!(store.delete_by_id(999).await.is_ok());
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
