//! Terminal implementations of the flow's collaborators.

use std::fmt::Write as _;

use tracing::debug;

use savepass::{Alert, LoginData, Navigator, Screen};

/// Shows alerts on stderr.
#[derive(Debug, Default)]
pub struct StderrAlert;

impl Alert for StderrAlert {
    fn alert(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Remembers where the flow asked to go; the binary renders that screen.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Option<Screen>,
}

impl TerminalNavigator {
    /// The screen most recently navigated to.
    #[must_use]
    pub fn current(&self) -> Option<Screen> {
        self.current
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, screen: Screen) {
        debug!("Navigating to {screen}");
        self.current = Some(screen);
    }
}

/// Render records as an aligned table, masking passwords unless `reveal`.
#[must_use]
pub fn render_logins(records: &[LoginData], reveal: bool) -> String {
    if records.is_empty() {
        return "No logins saved yet.\n".to_string();
    }

    let passwords: Vec<String> = records
        .iter()
        .map(|r| {
            if reveal {
                r.password.clone()
            } else {
                r.masked_password()
            }
        })
        .collect();

    let service_w = column_width("SERVICE", records.iter().map(|r| r.service_name.as_str()));
    let email_w = column_width("EMAIL", records.iter().map(|r| r.email.as_str()));

    let mut out = String::new();
    let _ = writeln!(out, "{:<service_w$}  {:<email_w$}  PASSWORD", "SERVICE", "EMAIL");
    for (record, password) in records.iter().zip(&passwords) {
        let _ = writeln!(
            out,
            "{:<service_w$}  {:<email_w$}  {password}",
            record.service_name, record.email
        );
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .fold(header.chars().count(), usize::max)
}
