//! Error types for savepass.
//!
//! Validation failures are not represented here: they are reported per field
//! through [`crate::validation::ValidationErrors`] and never reach storage.
//! Everything in this module is a storage-side failure, which the register
//! flow collapses into a single user-facing alert.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for savepass operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A storage slot holds a value that is not a list of login records.
    #[error("storage slot '{key}' is corrupt: {source}")]
    CorruptSlot {
        /// The storage key that was read.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Session Errors ===
    /// No user is signed in, so there is no storage slot to write to.
    #[error("no authenticated user")]
    NotAuthenticated,

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for savepass operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a corrupt slot error for the given key.
    #[must_use]
    pub fn corrupt_slot(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptSlot {
            key: key.into(),
            source,
        }
    }

    /// Check if this error indicates that no user is signed in.
    #[must_use]
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}
