//! Field-level validation shared by all write requests.
//!
//! Request types declare their constraints with `validator` derives; the
//! functions here run them and flatten the result into one list of
//! field/reason pairs so the caller sees every problem at once.

use std::borrow::Cow;

use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// A single violated field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Field name as it appears on the wire
    #[schema(example = "login")]
    pub field: String,
    #[schema(example = "Login must be between 3 and 30 characters")]
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Run the declared constraints of `value`, collecting every violation.
pub fn check<T: Validate>(value: &T) -> Result<(), Vec<FieldViolation>> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(collect_violations(&errors)),
    }
}

/// Flatten `validator` errors into wire-named violations, sorted by field.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let name = to_camel_case(&field.to_string());
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", name));
                FieldViolation::new(name.clone(), message)
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

/// Reject strings made only of whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
