//! Storage for employee records.
//!
//! The whole schema is one `employees` table keyed by `employee_id`, with a
//! second uniqueness guarantee on `email` compared case-insensitively. Dates
//! are stored as `YYYY-MM-DD` text; `created_at`/`updated_at` are epoch
//! milliseconds maintained by SQL defaults and the update statement.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - `open_db`/`open_db_in_memory` hand out connections only after every
//!   migration has been applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding every employee record.
pub const EMPLOYEES_TABLE: &str = "employees";

pub type DbResult<T> = Result<T, DbError>;

/// Connection and schema failures.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure, including constraint violations not mapped by
    /// the repository.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "employee database is at schema version {db_version}, this build supports up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
