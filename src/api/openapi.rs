//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::employee_handler;
use crate::domain::{EmployeeResponse, FieldViolation, UniqueField};

/// OpenAPI document for the employee directory
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "0.1.0",
        description = "Employee directory: create, read, update and delete employee records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
    ),
    components(
        schemas(
            EmployeeResponse,
            FieldViolation,
            UniqueField,
            employee_handler::CreateEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
        )
    ),
    tags(
        (name = "Employees", description = "Employee directory operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_employee_paths() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Employee Management API");
        assert!(doc.paths.paths.contains_key("/employees"));
        assert!(doc.paths.paths.contains_key("/employees/{id}"));
    }
}
