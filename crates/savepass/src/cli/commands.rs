//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Register command arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Name of the service (e.g. "GitHub")
    #[arg(short, long = "service", value_name = "NAME", default_value = "")]
    pub service_name: String,

    /// E-mail or username for the service
    #[arg(short, long, value_name = "EMAIL", default_value = "")]
    pub email: String,

    /// Password for the service; read from the first line of stdin when omitted
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show logins whose service name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show passwords instead of masking them
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
