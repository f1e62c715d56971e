//! Login record types for savepass.
//!
//! A [`LoginData`] is what ends up in a user's storage slot; a
//! [`LoginDataForm`] is what the user typed before an id was assigned.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fields of the register form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Name of the service the login belongs to.
    ServiceName,
    /// Email address or username used for the service.
    Email,
    /// Password used for the service.
    Password,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 3] = [Field::ServiceName, Field::Email, Field::Password];

    /// The key this field is stored under in a serialized record.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ServiceName => "service_name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Human-readable label for the field.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::ServiceName => "Service name",
            Self::Email => "E-mail or username",
            Self::Password => "Password",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Values collected by the register form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginDataForm {
    /// Name of the service.
    pub service_name: String,
    /// Email address or username.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginDataForm {
    /// Create a form from the three field values.
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Get the current value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ServiceName => &self.service_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::ServiceName => &mut self.service_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        };
        *slot = value.into();
    }
}

/// A stored login record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    /// Name of the service.
    pub service_name: String,
    /// Email address or username.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginData {
    /// Build a record from submitted form values, assigning a fresh id.
    ///
    /// The values are stored exactly as typed.
    #[must_use]
    pub fn from_form(form: LoginDataForm) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service_name: form.service_name,
            email: form.email,
            password: form.password,
        }
    }

    /// The password with every character replaced by a bullet.
    #[must_use]
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }
}
