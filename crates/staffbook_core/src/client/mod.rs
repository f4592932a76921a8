//! Headless employee form/list client.
//!
//! # Responsibility
//! - Validate form input locally before any store call.
//! - Drive the form state machine through submit/edit/reset.
//! - Reconcile the local list with server-confirmed records.
//!
//! # Invariants
//! - Nothing reaches the gateway while local validation fails.
//! - The local list changes only after the gateway confirms the operation.
//! - Unexpected failures surface as a generic notice, never internal detail.

pub mod directory;
pub mod export;
pub mod form;
pub mod validation;

use crate::model::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::repo::employee_repo::EmployeeRepository;
use crate::service::employee_service::{
    EmployeeService, ServiceError, ServiceResult, CREATED_MESSAGE, REMOVED_MESSAGE,
    UPDATED_MESSAGE,
};
use chrono::{Local, NaiveDate};
use directory::EmployeeDirectory;
use form::{EmployeeForm, FormError, FormField, FormMode};
use log::{debug, warn};
use validation::{validate_form, FieldErrors};

const SUBMIT_FAILED_MESSAGE: &str = "Submission failed";
const DELETE_FAILED_MESSAGE: &str = "Deletion failed";
const FETCH_FAILED_MESSAGE: &str = "Error fetching employee data";

/// Store operations the client depends on.
pub trait EmployeeGateway {
    fn create(&self, payload: NewEmployee) -> ServiceResult<Employee>;
    fn update(&self, employee_id: &str, changes: EmployeeUpdate) -> ServiceResult<Employee>;
    fn delete(&self, employee_id: &str) -> ServiceResult<()>;
    fn list(&self) -> ServiceResult<Vec<Employee>>;
}

impl<R: EmployeeRepository> EmployeeGateway for EmployeeService<R> {
    fn create(&self, payload: NewEmployee) -> ServiceResult<Employee> {
        self.create_employee(payload)
    }

    fn update(&self, employee_id: &str, changes: EmployeeUpdate) -> ServiceResult<Employee> {
        self.update_employee(employee_id, changes)
    }

    fn delete(&self, employee_id: &str) -> ServiceResult<()> {
        self.delete_employee(employee_id)
    }

    fn list(&self) -> ServiceResult<Vec<Employee>> {
        self.list_employees()
    }
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The store confirmed this record.
    Saved(Employee),
    /// The store rejected the request or failed.
    Failed(ServiceError),
}

/// Form plus list, bound to one gateway.
pub struct EmployeeClient<G: EmployeeGateway> {
    gateway: G,
    form: EmployeeForm,
    directory: EmployeeDirectory,
    errors: FieldErrors,
    message: Option<String>,
}

impl<G: EmployeeGateway> EmployeeClient<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            form: EmployeeForm::new(),
            directory: EmployeeDirectory::new(),
            errors: FieldErrors::default(),
            message: None,
        }
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn employees(&self) -> &[Employee] {
        self.directory.records()
    }

    /// Field errors from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Latest status message for the user.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field(field, value)
    }

    /// Reloads the local list from the store.
    pub fn refresh(&mut self) -> ServiceResult<()> {
        match self.gateway.list() {
            Ok(records) => {
                self.directory.replace_all(records);
                Ok(())
            }
            Err(err) => {
                warn!("event=client_refresh module=client status=error error={err}");
                self.message = Some(FETCH_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Enters edit mode for a listed record. Returns `false` when it is not listed.
    pub fn begin_edit(&mut self, employee_id: &str) -> bool {
        match self.directory.find(employee_id) {
            Some(employee) => {
                self.form.begin_edit(employee);
                self.errors = FieldErrors::default();
                true
            }
            None => false,
        }
    }

    /// Clears the form back to a blank create form.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.errors = FieldErrors::default();
    }

    /// Validates against the local date and submits.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submit_as_of(Local::now().date_naive())
    }

    /// Validates against `today` and submits a create or update.
    pub fn submit_as_of(&mut self, today: NaiveDate) -> SubmitOutcome {
        let errors = validate_form(self.form.data(), today);
        if !errors.is_empty() {
            debug!(
                "event=client_submit module=client status=invalid error_count={}",
                errors.len()
            );
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }

        self.errors = FieldErrors::default();
        self.form.start_submit();
        let data = self.form.data();
        let (result, success_message) = match self.form.mode() {
            FormMode::Create => (self.gateway.create(data.to_new_employee()), CREATED_MESSAGE),
            FormMode::Edit { employee_id } => (
                self.gateway.update(employee_id, data.to_update()),
                UPDATED_MESSAGE,
            ),
        };

        match result {
            Ok(employee) => {
                self.directory.apply(employee.clone());
                self.message = Some(success_message.to_string());
                self.form.reset();
                SubmitOutcome::Saved(employee)
            }
            Err(err) => {
                self.message = Some(user_message(&err, SUBMIT_FAILED_MESSAGE));
                self.form.submit_failed();
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Deletes a record and drops it locally once the store confirms.
    pub fn remove(&mut self, employee_id: &str) -> ServiceResult<()> {
        match self.gateway.delete(employee_id) {
            Ok(()) => {
                self.directory.remove(employee_id);
                self.message = Some(REMOVED_MESSAGE.to_string());
                Ok(())
            }
            Err(err) => {
                warn!("event=client_remove module=client status=error error={err}");
                self.message = Some(DELETE_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Current list as a Markdown document.
    pub fn export_markdown(&self) -> String {
        export::render_markdown(self.directory.records())
    }
}

fn user_message(err: &ServiceError, fallback: &str) -> String {
    if err.is_user_facing() {
        err.to_string()
    } else {
        fallback.to_string()
    }
}
