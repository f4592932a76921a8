//! Employee form state machine.
//!
//! # Invariants
//! - State moves `Idle -> Editing -> Submitting -> Idle | Editing`.
//! - In edit mode the identifier field is locked to the record being edited.
//! - A reset always yields a blank `Idle` form in create mode.

use crate::model::employee::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    EmployeeId,
    Email,
    Phone,
    Department,
    DateOfJoining,
    Role,
}

impl FormField {
    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::EmployeeId => "employeeId",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Department => "department",
            Self::DateOfJoining => "dateOfJoining",
            Self::Role => "role",
        }
    }
}

/// Raw text held by the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub employee_id: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date_of_joining: String,
    pub role: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::EmployeeId => &self.employee_id,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Department => &self.department,
            FormField::DateOfJoining => &self.date_of_joining,
            FormField::Role => &self.role,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::EmployeeId => &mut self.employee_id,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Department => &mut self.department,
            FormField::DateOfJoining => &mut self.date_of_joining,
            FormField::Role => &mut self.role,
        }
    }

    pub fn to_new_employee(&self) -> NewEmployee {
        NewEmployee {
            employee_id: Some(self.employee_id.clone()),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            department: Some(self.department.clone()),
            date_of_joining: Some(self.date_of_joining.clone()),
            role: Some(self.role.clone()),
        }
    }

    pub fn to_update(&self) -> EmployeeUpdate {
        EmployeeUpdate {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            department: Some(self.department.clone()),
            date_of_joining: Some(self.date_of_joining.clone()),
            role: Some(self.role.clone()),
        }
    }
}

impl From<&Employee> for FormData {
    fn from(value: &Employee) -> Self {
        Self {
            name: value.name.clone(),
            employee_id: value.employee_id.clone(),
            email: value.email.clone(),
            phone: value.phone.clone(),
            department: value.department.clone(),
            date_of_joining: value.date_of_joining.clone(),
            role: value.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { employee_id: EmployeeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The field cannot change in the current mode.
    FieldLocked(FormField),
    /// Input is not accepted while a submission is in flight.
    Busy,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldLocked(field) => write!(f, "field `{}` is locked", field.key()),
            Self::Busy => f.write_str("form is submitting"),
        }
    }
}

impl Error for FormError {}

/// Add/edit form for one employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    data: FormData,
    mode: FormMode,
    state: FormState,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            data: FormData::default(),
            mode: FormMode::Create,
            state: FormState::Idle,
        }
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether `field` accepts input in the current mode.
    pub fn is_locked(&self, field: FormField) -> bool {
        field == FormField::EmployeeId && matches!(self.mode, FormMode::Edit { .. })
    }

    /// Sets one field's raw text and moves the form into `Editing`.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::Busy);
        }
        if self.is_locked(field) {
            return Err(FormError::FieldLocked(field));
        }

        *self.data.slot(field) = value.into();
        self.state = FormState::Editing;
        Ok(())
    }

    /// Pre-fills every field from `employee` and locks the identifier.
    pub fn begin_edit(&mut self, employee: &Employee) {
        self.data = FormData::from(employee);
        self.mode = FormMode::Edit {
            employee_id: employee.employee_id.clone(),
        };
        self.state = FormState::Editing;
    }

    /// Returns to a blank create-mode form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn start_submit(&mut self) {
        self.state = FormState::Submitting;
    }

    /// Submission failed; input is retained for correction.
    pub(crate) fn submit_failed(&mut self) {
        self.state = FormState::Editing;
    }
}
