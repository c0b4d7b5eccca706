//! Employee domain entity and write requests.

use serde::Serialize;
use utoipa::ToSchema;

/// Fields that must be unique across the whole directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UniqueField {
    Login,
    Email,
}

impl UniqueField {
    /// Resolve the field behind a storage-level unique violation.
    ///
    /// The detail is whatever the backend reports (index name or message).
    pub fn from_constraint(detail: &str) -> Self {
        if detail.to_ascii_lowercase().contains("email") {
            UniqueField::Email
        } else {
            UniqueField::Login
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::Login => write!(f, "login"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

/// Employee domain entity
#[derive(Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub login: String,
    pub email: String,
    pub password_hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("middle_name", &self.middle_name)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl Employee {
    /// Apply an update on top of this record.
    ///
    /// Present names, login and email replace the stored values. The middle
    /// name is always replaced, so an absent one clears it. The password hash
    /// is left alone; rehashing is the caller's job.
    pub fn merged_with(&self, changes: &UpdateEmployee) -> Employee {
        Employee {
            id: self.id,
            first_name: changes
                .first_name
                .clone()
                .unwrap_or_else(|| self.first_name.clone()),
            last_name: changes
                .last_name
                .clone()
                .unwrap_or_else(|| self.last_name.clone()),
            middle_name: changes.middle_name.clone(),
            login: changes.login.clone().unwrap_or_else(|| self.login.clone()),
            email: changes.email.clone().unwrap_or_else(|| self.email.clone()),
            password_hash: self.password_hash.clone(),
        }
    }
}

/// Employee that has not been stored yet (no id).
#[derive(Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub login: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewEmployee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewEmployee")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl NewEmployee {
    /// Attach the id assigned by storage.
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            login: self.login,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

/// Write request for a new employee (plaintext password).
#[derive(Clone)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub login: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateEmployee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateEmployee")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Write request for an existing employee.
#[derive(Clone, Default)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    /// Absent or empty keeps the stored hash
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateEmployee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateEmployee")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl UpdateEmployee {
    /// The replacement password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Employee response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    /// Identifier assigned on creation
    #[schema(example = 100)]
    pub id: i64,
    #[schema(example = "Иван")]
    pub first_name: String,
    #[schema(example = "Иванов")]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Петрович")]
    pub middle_name: Option<String>,
    #[schema(example = "ivanov")]
    pub login: String,
    #[schema(example = "ivanov@example.com")]
    pub email: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            middle_name: employee.middle_name,
            login: employee.login,
            email: employee.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        Employee {
            id: 1,
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            middle_name: Some("Петрович".to_string()),
            login: "ivanov".to_string(),
            email: "ivanov@example.com".to_string(),
            password_hash: "$argon2id$stored".to_string(),
        }
    }

    #[test]
    fn test_merge_replaces_present_fields() {
        let changes = UpdateEmployee {
            first_name: Some("Пётр".to_string()),
            login: Some("petrov".to_string()),
            middle_name: Some("Ильич".to_string()),
            ..Default::default()
        };

        let merged = stored().merged_with(&changes);

        assert_eq!(merged.id, 1);
        assert_eq!(merged.first_name, "Пётр");
        assert_eq!(merged.last_name, "Иванов");
        assert_eq!(merged.login, "petrov");
        assert_eq!(merged.email, "ivanov@example.com");
        assert_eq!(merged.middle_name.as_deref(), Some("Ильич"));
        assert_eq!(merged.password_hash, "$argon2id$stored");
    }

    #[test]
    fn test_merge_clears_absent_middle_name() {
        let merged = stored().merged_with(&UpdateEmployee::default());
        assert_eq!(merged.middle_name, None);
    }

    #[test]
    fn test_new_password_ignores_empty() {
        let mut changes = UpdateEmployee::default();
        assert_eq!(changes.new_password(), None);

        changes.password = Some(String::new());
        assert_eq!(changes.new_password(), None);

        changes.password = Some("secret1".to_string());
        assert_eq!(changes.new_password(), Some("secret1"));
    }

    #[test]
    fn test_response_never_carries_password() {
        let json = serde_json::to_value(EmployeeResponse::from(stored())).unwrap();

        assert_eq!(json["firstName"], "Иван");
        assert_eq!(json["login"], "ivanov");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", stored());
        assert!(!rendered.contains("$argon2id$stored"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_unique_field_from_constraint() {
        assert_eq!(
            UniqueField::from_constraint(
                "duplicate key value violates unique constraint \"idx_employees_email\""
            ),
            UniqueField::Email
        );
        assert_eq!(
            UniqueField::from_constraint("idx_employees_login"),
            UniqueField::Login
        );
    }
}
