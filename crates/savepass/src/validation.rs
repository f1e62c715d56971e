//! Field-level validation for the register form.
//!
//! The schema is fixed: all three fields are required and the email field
//! must additionally look like an email address. Each field reports at most
//! one error, with "required" taking precedence over "malformed".

use std::sync::LazyLock;

use regex::Regex;

use crate::login::{Field, LoginDataForm};

/// Message shown when the service name is missing.
pub const SERVICE_NAME_REQUIRED: &str = "Service name is required!";

/// Message shown when the email is missing.
pub const EMAIL_REQUIRED: &str = "Email is required!";

/// Message shown when the email is not shaped like an email address.
pub const EMAIL_INVALID: &str = "Not a valid email";

/// Message shown when the password is missing.
pub const PASSWORD_REQUIRED: &str = "Password is required!";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// A validation failure on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Message to show next to the field.
    pub message: &'static str,
}

/// The set of field errors produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Get the error message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check whether a value has the shape of an email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Validate a single field value.
///
/// Returns the message to display, or `None` when the value is acceptable.
#[must_use]
pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::ServiceName if value.is_empty() => Some(SERVICE_NAME_REQUIRED),
        Field::Email if value.is_empty() => Some(EMAIL_REQUIRED),
        Field::Email if !is_email(value) => Some(EMAIL_INVALID),
        Field::Password if value.is_empty() => Some(PASSWORD_REQUIRED),
        _ => None,
    }
}

/// Validate the whole form.
///
/// # Errors
///
/// Returns every failing field when at least one field is invalid.
pub fn validate(form: &LoginDataForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in Field::ALL {
        if let Some(message) = validate_field(field, form.get(field)) {
            errors.push(field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
