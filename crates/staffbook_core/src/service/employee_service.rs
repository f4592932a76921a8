//! Employee use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/list entry points for API and client callers.
//! - Return the server-confirmed record after each write.
//!
//! # Invariants
//! - Presence checks run before any storage access.
//! - Create and update read back the stored row; callers never echo input.
//! - Errors are one of `Validation`, `Conflict`, `NotFound`, `Unexpected`.

use crate::model::employee::{
    Employee, EmployeeId, EmployeeUpdate, EmployeeValidationError, NewEmployee,
};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, UniqueField};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CREATED_MESSAGE: &str = "Employee added successfully";
pub const UPDATED_MESSAGE: &str = "Employee updated successfully";
pub const REMOVED_MESSAGE: &str = "Employee removed successfully";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error taxonomy for employee operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing or malformed required field.
    Validation(EmployeeValidationError),
    /// Create or update would duplicate an identifier or email.
    Conflict(UniqueField),
    /// Unknown identifier on get/update/delete.
    NotFound(EmployeeId),
    /// Storage failure; detail is for logs only.
    Unexpected(RepoError),
}

impl ServiceError {
    /// Whether the message is safe and useful to show to an end user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(field) => write!(f, "{field} already exists"),
            Self::NotFound(_) => f.write_str("Employee not found"),
            Self::Unexpected(err) => write!(f, "unexpected storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unexpected(err) => Some(err),
            Self::Conflict(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for ServiceError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(employee_id) => Self::NotFound(employee_id),
            RepoError::Conflict(field) => Self::Conflict(field),
            other => Self::Unexpected(other),
        }
    }
}

/// Employee lifecycle facade over a repository implementation.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new record and returns it as stored.
    ///
    /// # Errors
    /// - `Validation` when any of the seven fields is missing or blank.
    /// - `Conflict` when the identifier or email is already taken.
    pub fn create_employee(&self, payload: NewEmployee) -> ServiceResult<Employee> {
        let employee = payload.validate().inspect_err(|err| {
            warn!("event=employee_create module=service status=rejected reason=\"{err}\"");
        })?;

        if let Err(err) = self.repo.create_employee(&employee) {
            log_failure("employee_create", &employee.employee_id, &err);
            return Err(err.into());
        }

        let stored = self.read_back(&employee.employee_id)?;
        info!(
            "event=employee_create module=service status=ok employee_id={}",
            stored.employee_id
        );
        Ok(stored)
    }

    /// Replaces all six mutable fields of `employee_id` and returns the stored record.
    ///
    /// # Errors
    /// - `Validation` when the identifier or any mutable field is missing.
    /// - `NotFound` when no record has `employee_id`.
    /// - `Conflict` when the new email belongs to another record.
    pub fn update_employee(
        &self,
        employee_id: &str,
        changes: EmployeeUpdate,
    ) -> ServiceResult<Employee> {
        let employee = changes.apply_to(employee_id).inspect_err(|err| {
            warn!("event=employee_update module=service status=rejected reason=\"{err}\"");
        })?;

        if let Err(err) = self.repo.update_employee(&employee) {
            log_failure("employee_update", &employee.employee_id, &err);
            return Err(err.into());
        }

        let stored = self.read_back(&employee.employee_id)?;
        info!(
            "event=employee_update module=service status=ok employee_id={}",
            stored.employee_id
        );
        Ok(stored)
    }

    /// Removes the record with `employee_id`.
    ///
    /// # Errors
    /// - `Validation` when `employee_id` is blank.
    /// - `NotFound` when nothing was removed.
    pub fn delete_employee(&self, employee_id: &str) -> ServiceResult<()> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(EmployeeValidationError::MissingEmployeeId.into());
        }

        if let Err(err) = self.repo.delete_employee(employee_id) {
            log_failure("employee_delete", employee_id, &err);
            return Err(err.into());
        }

        info!("event=employee_delete module=service status=ok employee_id={employee_id}");
        Ok(())
    }

    /// Gets one record by identifier.
    pub fn get_employee(&self, employee_id: &str) -> ServiceResult<Employee> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(EmployeeValidationError::MissingEmployeeId.into());
        }

        self.repo
            .get_employee(employee_id)?
            .ok_or_else(|| ServiceError::NotFound(employee_id.to_string()))
    }

    /// Lists every record, unfiltered and unpaginated.
    pub fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        let employees = self.repo.list_employees()?;
        info!(
            "event=employee_list module=service status=ok count={}",
            employees.len()
        );
        Ok(employees)
    }

    fn read_back(&self, employee_id: &str) -> ServiceResult<Employee> {
        self.repo.get_employee(employee_id)?.ok_or_else(|| {
            ServiceError::Unexpected(RepoError::InvalidData(format!(
                "employee `{employee_id}` missing on read-back"
            )))
        })
    }
}

fn log_failure(event: &str, employee_id: &str, err: &RepoError) {
    match err {
        RepoError::NotFound(_) | RepoError::Conflict(_) => warn!(
            "event={event} module=service status=rejected employee_id={employee_id} reason=\"{err}\""
        ),
        _ => error!(
            "event={event} module=service status=error employee_id={employee_id} error={err}"
        ),
    }
}
