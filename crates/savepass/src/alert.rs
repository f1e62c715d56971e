//! User-facing alerts.

/// The one message shown when a login could not be saved.
pub const SAVE_FAILED_MESSAGE: &str = "Could not save your password";

/// Capability to show a blocking message to the user.
pub trait Alert {
    /// Show `message`.
    fn alert(&mut self, message: &str);
}
