//! Navigation between screens.

/// Destinations the app can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The list of saved logins.
    Home,
    /// The form for registering a new login.
    RegisterLoginData,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::RegisterLoginData => write!(f, "RegisterLoginData"),
        }
    }
}

/// Capability to move to another screen.
pub trait Navigator {
    /// Navigate to `screen`.
    fn navigate(&mut self, screen: Screen);
}
