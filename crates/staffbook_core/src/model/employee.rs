//! Employee domain model.
//!
//! # Invariants
//! - Every field of a persisted `Employee` is non-empty after trimming.
//! - `EmployeeUpdate` carries no identifier, so applying it can never move a
//!   record to a different `employee_id`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Externally assigned employee identifier.
pub type EmployeeId = String;

/// Fixed department set offered by the form client.
///
/// The store accepts any non-empty department text; only the client restricts
/// input to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Hr,
    Engineering,
    Marketing,
}

impl Department {
    pub const ALL: [Department; 3] = [Self::Hr, Self::Engineering, Self::Marketing];

    /// Stored and displayed label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Engineering => "Engineering",
            Self::Marketing => "Marketing",
        }
    }

    /// Parses an exact label. Labels are case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|department| department.label() == value)
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One persisted employee record.
///
/// Serialized with camelCase keys (`employeeId`, `dateOfJoining`) to match
/// the REST contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub email: String,
    /// Ten digits, validated client-side.
    pub phone: String,
    pub department: String,
    /// ISO `YYYY-MM-DD` calendar date.
    pub date_of_joining: String,
    pub role: String,
}

/// Create payload. Every field is optional on the wire so that a missing
/// field surfaces as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub date_of_joining: Option<String>,
    pub role: Option<String>,
}

/// Full replacement of the six mutable fields of an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub date_of_joining: Option<String>,
    pub role: Option<String>,
}

/// Presence failures detected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Identifier missing or blank.
    MissingEmployeeId,
    /// One or more required fields missing or blank, by wire name.
    MissingFields(Vec<&'static str>),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEmployeeId => f.write_str("Employee ID is required"),
            Self::MissingFields(fields) => {
                write!(f, "All fields are required (missing: {})", fields.join(", "))
            }
        }
    }
}

impl Error for EmployeeValidationError {}

impl NewEmployee {
    /// Checks that all seven fields are present and returns the trimmed record.
    ///
    /// # Errors
    /// - `MissingFields` listing every absent or blank field.
    pub fn validate(self) -> Result<Employee, EmployeeValidationError> {
        let mut missing = Vec::new();
        let employee_id = required(self.employee_id, "employeeId", &mut missing);
        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let phone = required(self.phone, "phone", &mut missing);
        let department = required(self.department, "department", &mut missing);
        let date_of_joining = required(self.date_of_joining, "dateOfJoining", &mut missing);
        let role = required(self.role, "role", &mut missing);

        if !missing.is_empty() {
            return Err(EmployeeValidationError::MissingFields(missing));
        }

        Ok(Employee {
            employee_id,
            name,
            email,
            phone,
            department,
            date_of_joining,
            role,
        })
    }
}

impl EmployeeUpdate {
    /// Builds the replacement record for `employee_id`.
    ///
    /// # Errors
    /// - `MissingEmployeeId` when the identifier is blank (checked first).
    /// - `MissingFields` listing every absent or blank mutable field.
    pub fn apply_to(self, employee_id: &str) -> Result<Employee, EmployeeValidationError> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(EmployeeValidationError::MissingEmployeeId);
        }

        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let phone = required(self.phone, "phone", &mut missing);
        let department = required(self.department, "department", &mut missing);
        let date_of_joining = required(self.date_of_joining, "dateOfJoining", &mut missing);
        let role = required(self.role, "role", &mut missing);

        if !missing.is_empty() {
            return Err(EmployeeValidationError::MissingFields(missing));
        }

        Ok(Employee {
            employee_id: employee_id.to_string(),
            name,
            email,
            phone,
            department,
            date_of_joining,
            role,
        })
    }
}

impl From<&Employee> for NewEmployee {
    fn from(value: &Employee) -> Self {
        Self {
            employee_id: Some(value.employee_id.clone()),
            name: Some(value.name.clone()),
            email: Some(value.email.clone()),
            phone: Some(value.phone.clone()),
            department: Some(value.department.clone()),
            date_of_joining: Some(value.date_of_joining.clone()),
            role: Some(value.role.clone()),
        }
    }
}

impl From<&Employee> for EmployeeUpdate {
    fn from(value: &Employee) -> Self {
        Self {
            name: Some(value.name.clone()),
            email: Some(value.email.clone()),
            phone: Some(value.phone.clone()),
            department: Some(value.department.clone()),
            date_of_joining: Some(value.date_of_joining.clone()),
            role: Some(value.role.clone()),
        }
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => {
            missing.push(field);
            String::new()
        }
    }
}
