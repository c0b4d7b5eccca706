//! Employee directory handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::validation::not_blank;
use crate::domain::{CreateEmployee, EmployeeResponse, UpdateEmployee};
use crate::errors::{AppResult, OptionExt};
use crate::types::{Created, NoContent};

/// New employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    #[validate(
        required(message = "First name is required"),
        length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"),
        custom(function = "not_blank", message = "First name is required")
    )]
    #[schema(example = "Иван")]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Last name is required"),
        length(min = 2, max = 50, message = "Last name must be between 2 and 50 characters"),
        custom(function = "not_blank", message = "Last name is required")
    )]
    #[schema(example = "Иванов")]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "Middle name must not exceed 50 characters"))]
    #[schema(example = "Петрович")]
    pub middle_name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Login is required"),
        length(min = 3, max = 30, message = "Login must be between 3 and 30 characters"),
        custom(function = "not_blank", message = "Login is required")
    )]
    #[schema(example = "ivanov")]
    pub login: Option<String>,

    /// Plaintext; stored only as a hash
    #[serde(default)]
    #[validate(
        required(message = "Password is required"),
        length(min = 6, max = 100, message = "Password must be between 6 and 100 characters")
    )]
    #[schema(example = "secret1", min_length = 6, max_length = 100)]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format")
    )]
    #[schema(example = "ivanov@example.com")]
    pub email: Option<String>,
}

impl From<CreateEmployeeRequest> for CreateEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        // Required fields are guaranteed by validation at this point
        Self {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            middle_name: request.middle_name,
            login: request.login.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        }
    }
}

/// Employee update request.
///
/// Absent names, login and email keep their stored values. An absent
/// `middleName` clears it. An absent or empty `password` keeps the stored one.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    #[validate(
        length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"),
        custom(function = "not_blank", message = "First name must not be blank")
    )]
    #[schema(example = "Иван")]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(
        length(min = 2, max = 50, message = "Last name must be between 2 and 50 characters"),
        custom(function = "not_blank", message = "Last name must not be blank")
    )]
    #[schema(example = "Иванов")]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "Middle name must not exceed 50 characters"))]
    #[schema(example = "Петрович")]
    pub middle_name: Option<String>,

    #[serde(default)]
    #[validate(
        length(min = 3, max = 30, message = "Login must be between 3 and 30 characters"),
        custom(function = "not_blank", message = "Login must not be blank")
    )]
    #[schema(example = "ivanov")]
    pub login: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    #[schema(example = "newSecret", min_length = 6, max_length = 100)]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ivanov@example.com")]
    pub email: Option<String>,
}

impl From<UpdateEmployeeRequest> for UpdateEmployee {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: request.middle_name,
            login: request.login,
            email: request.email,
            password: request.password,
        }
    }
}

/// `""` means "not supplied" for the update password.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

/// List every employee
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees, ordered by id", body = Vec<EmployeeResponse>)
    )
)]
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.directory.list_employees().await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.directory.find_employee(id).await?.ok_or_not_found()?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error, or login/email already exists")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<Created<EmployeeResponse>> {
    let employee = state.directory.create_employee(payload.into()).await?;
    Ok(Created(EmployeeResponse::from(employee)))
}

/// Update an existing employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error, or login/email already exists"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.directory.update_employee(id, payload.into()).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Delete employee by ID
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted (or never existed)")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.directory.delete_employee(id).await?;
    Ok(NoContent)
}
