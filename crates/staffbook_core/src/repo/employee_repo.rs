//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD statements over the `employees` table.
//! - Translate SQLite constraint failures into semantic conflicts.
//!
//! # Invariants
//! - Each mutating call is exactly one SQL statement, so it either fully
//!   applies or leaves stored state unchanged.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::{DbError, EMPLOYEES_TABLE};
use crate::model::employee::{Employee, EmployeeId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employee_id,
    name,
    email,
    phone,
    department,
    date_of_joining,
    role
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Column protected by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    EmployeeId,
    Email,
}

impl UniqueField {
    /// Human-readable field label.
    pub fn label(self) -> &'static str {
        match self {
            Self::EmployeeId => "Employee ID",
            Self::Email => "Email",
        }
    }
}

impl Display for UniqueField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Repository error for employee persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EmployeeId),
    Conflict(UniqueField),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Conflict(field) => write!(f, "{field} already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Overwrites all mutable fields of the record keyed by `employee.employee_id`.
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn get_employee(&self, employee_id: &str) -> RepoResult<Option<Employee>>;
    /// All records in insertion order.
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn delete_employee(&self, employee_id: &str) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [EMPLOYEES_TABLE],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::InvalidData(format!(
                "{EMPLOYEES_TABLE} table is missing"
            )));
        }

        Ok(Self { conn })
    }
}

impl SqliteEmployeeRepository<'_> {
    fn employee_id_taken(&self, employee_id: &str) -> RepoResult<bool> {
        let taken = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?1);",
            [employee_id],
            |row| row.get(0),
        )?;
        Ok(taken)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    /// When both identifier and email collide, the identifier is reported.
    fn create_employee(&self, employee: &Employee) -> RepoResult<()> {
        let inserted = self
            .conn
            .execute(
                "INSERT INTO employees (
                    employee_id,
                    name,
                    email,
                    phone,
                    department,
                    date_of_joining,
                    role
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    employee.employee_id,
                    employee.name,
                    employee.email,
                    employee.phone,
                    employee.department,
                    employee.date_of_joining,
                    employee.role,
                ],
            )
            .map_err(map_write_error);

        match inserted {
            Ok(_) => Ok(()),
            Err(RepoError::Conflict(UniqueField::Email))
                if self.employee_id_taken(&employee.employee_id)? =>
            {
                Err(RepoError::Conflict(UniqueField::EmployeeId))
            }
            Err(err) => Err(err),
        }
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE employees
                 SET
                    name = ?1,
                    email = ?2,
                    phone = ?3,
                    department = ?4,
                    date_of_joining = ?5,
                    role = ?6,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE employee_id = ?7;",
                params![
                    employee.name,
                    employee.email,
                    employee.phone,
                    employee.department,
                    employee.date_of_joining,
                    employee.role,
                    employee.employee_id,
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.employee_id.clone()));
        }

        Ok(())
    }

    fn get_employee(&self, employee_id: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE employee_id = ?1;"))?;

        let row = stmt
            .query_row([employee_id], |row| Ok(read_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(read_row(row)?);
        }

        Ok(employees)
    }

    fn delete_employee(&self, employee_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE employee_id = ?1;", [employee_id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee_id.to_string()));
        }

        Ok(())
    }
}

fn read_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        employee_id: row.get("employee_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        department: row.get("department")?,
        date_of_joining: row.get("date_of_joining")?,
        role: row.get("role")?,
    };

    let blank = [
        ("employee_id", &employee.employee_id),
        ("name", &employee.name),
        ("email", &employee.email),
        ("phone", &employee.phone),
        ("department", &employee.department),
        ("date_of_joining", &employee.date_of_joining),
        ("role", &employee.role),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    if let Some((column, _)) = blank {
        return Err(RepoError::InvalidData(format!(
            "empty employees.{column} for `{}`",
            employee.employee_id
        )));
    }

    Ok(employee)
}

/// Maps a uniqueness violation to the colliding column.
fn map_write_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            if message.contains("employees.email") {
                return RepoError::Conflict(UniqueField::Email);
            }
            if message.contains("employees.employee_id") {
                return RepoError::Conflict(UniqueField::EmployeeId);
            }
        }
    }
    err.into()
}
