//! Authentication context.
//!
//! The register flow only needs to know who is signed in so it can pick the
//! right storage slot.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, used to derive the storage key.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Create a user with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }
}

/// Source of the currently authenticated user.
pub trait AuthContext {
    /// The signed-in user, or `None` when nobody is signed in.
    fn user(&self) -> Option<&User>;
}

/// An [`AuthContext`] whose user is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<User>,
}

impl StaticSession {
    /// A session with the given user signed in.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthContext for StaticSession {
    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_session() {
        let session = StaticSession::signed_in(User::new("42"));
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("42"));
    }

    #[test]
    fn test_anonymous_session() {
        assert!(StaticSession::anonymous().user().is_none());
    }

    #[test]
    fn test_user_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&User::new("7")).unwrap();
        assert_eq!(json, r#"{"id":"7"}"#);
    }
}
