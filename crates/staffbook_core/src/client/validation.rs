//! Client-side field validation.
//!
//! # Invariants
//! - Every failing field is reported; validation never stops at the first error.
//! - "Today" is supplied by the caller so checks stay deterministic.

use super::form::{FormData, FormField};
use crate::model::employee::Department;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Basic `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Exactly ten ASCII digits.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Parses a zero-padded ISO `YYYY-MM-DD` date; any other spelling is rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
}

/// Whether `date` is on or before `today`.
pub fn validate_date(date: NaiveDate, today: NaiveDate) -> bool {
    date <= today
}

pub fn validate_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Field-keyed validation messages, ordered by form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, &'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Validates all form fields against `today`.
pub fn validate_form(data: &FormData, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !validate_not_empty(&data.name) {
        errors.insert(FormField::Name, "Name is required");
    }
    if !validate_not_empty(&data.employee_id) {
        errors.insert(FormField::EmployeeId, "Employee ID is required");
    }
    if !validate_email(data.email.trim()) {
        errors.insert(FormField::Email, "Invalid email format");
    }
    if !validate_phone(data.phone.trim()) {
        errors.insert(FormField::Phone, "Invalid phone number");
    }
    if !validate_not_empty(&data.department) {
        errors.insert(FormField::Department, "Department is required");
    } else if Department::parse(data.department.trim()).is_none() {
        errors.insert(FormField::Department, "Unknown department");
    }
    match parse_date(&data.date_of_joining) {
        Some(date) if !validate_date(date, today) => {
            errors.insert(FormField::DateOfJoining, "Date cannot be in the future");
        }
        Some(_) => {}
        None => errors.insert(FormField::DateOfJoining, "Invalid date"),
    }
    if !validate_not_empty(&data.role) {
        errors.insert(FormField::Role, "Role is required");
    }

    errors
}
