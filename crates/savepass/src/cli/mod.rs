//! Command-line interface for savepass.
//!
//! This module provides the CLI structure for the `savepass` binary, plus the
//! terminal-backed navigation and alert capabilities the register flow needs.

mod commands;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ListCommand, RegisterCommand, StatusCommand};
pub use terminal::{render_logins, StderrAlert, TerminalNavigator};

use savepass::logging::Verbosity;

/// savepass - Keep track of your logins
///
/// Registers service logins (service name, e-mail or username, password)
/// for the signed-in user and lists them back.
#[derive(Debug, Parser)]
#[command(name = "savepass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Act as this user instead of the configured one
    #[arg(short, long, global = true, value_name = "ID", value_parser = parse_user_id)]
    pub user: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new login
    Register(RegisterCommand),

    /// List saved logins
    List(ListCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

fn parse_user_id(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("user id must not be blank".to_string())
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "savepass");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["savepass", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["savepass", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["savepass", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["savepass", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_register() {
        let cli = parse(&[
            "savepass", "register", "--service", "GitHub", "--email", "me@example.com",
            "--password", "pw",
        ]);
        let Command::Register(cmd) = cli.command else {
            panic!("expected register command");
        };
        assert_eq!(cmd.service_name, "GitHub");
        assert_eq!(cmd.email, "me@example.com");
        assert_eq!(cmd.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_parse_register_without_fields() {
        let cli = parse(&["savepass", "register"]);
        let Command::Register(cmd) = cli.command else {
            panic!("expected register command");
        };
        assert!(cmd.service_name.is_empty());
        assert!(cmd.email.is_empty());
        assert!(cmd.password.is_none());
    }

    #[test]
    fn test_parse_list_with_search() {
        let cli = parse(&["savepass", "list", "--search", "git", "--json"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.search.as_deref(), Some("git"));
        assert!(cmd.json);
        assert!(!cmd.reveal);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = parse(&["savepass", "list"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert!(cmd.search.is_none());
        assert!(!cmd.json);
    }

    #[test]
    fn test_blank_user_is_rejected() {
        assert!(Cli::try_parse_from(["savepass", "-u", "", "list"]).is_err());
        assert!(Cli::try_parse_from(["savepass", "list", "--user", "  "]).is_err());
    }

    #[test]
    fn test_parse_global_user_and_config() {
        let cli = parse(&["savepass", "-c", "/custom/config.toml", "list", "-u", "alice"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.user.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_status() {
        let cli = parse(&["savepass", "status", "--json"]);
        assert!(matches!(cli.command, Command::Status(StatusCommand { json: true })));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["savepass", "config", "validate", "--file", "/tmp/c.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
