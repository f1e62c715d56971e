//! Schema versioning for the savepass database.
//!
//! The base tables come from [`SCHEMA_STATEMENTS`]; each entry in
//! [`MIGRATIONS`] moves the schema up one version and runs inside its own
//! transaction, so a failed step leaves the recorded version untouched.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// A single upgrade step.
struct Migration {
    version: i32,
    description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

/// Every known migration, in ascending version order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "initial key-value schema",
    apply: migrate_v1,
}];

/// Create the base schema and bring it up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if schema creation or any migration fails, or if the
/// database was written by a newer version of savepass.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > version) {
        apply_migration(conn, migration)?;
    }

    Ok(())
}

/// Read the recorded schema version; 0 for a fresh database.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        None => Ok(0),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    debug!(
        "Applying migration v{}: {}",
        migration.version, migration.description
    );

    let tx = conn.unchecked_transaction()?;
    (migration.apply)(&tx)?;
    set_schema_version(&tx, migration.version)?;
    tx.commit()?;

    info!("Database schema at version {}", migration.version);
    Ok(())
}

/// Version 1 is the base schema, already created by `SCHEMA_STATEMENTS`.
#[allow(clippy::unnecessary_wraps)]
fn migrate_v1(_conn: &Connection) -> Result<()> {
    Ok(())
}
