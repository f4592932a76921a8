//! Locally held employee list and its reconciliation rules.
//!
//! # Invariants
//! - Only server-confirmed records enter the list.
//! - At most one entry per identifier.

use crate::model::employee::Employee;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDirectory {
    records: Vec<Employee>,
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, employee_id: &str) -> Option<&Employee> {
        self.records
            .iter()
            .find(|record| record.employee_id == employee_id)
    }

    /// Replaces the whole list with a fresh listing.
    pub fn replace_all(&mut self, records: Vec<Employee>) {
        self.records = records;
    }

    /// Applies a confirmed record: replaces by identifier, or appends.
    pub fn apply(&mut self, record: Employee) {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.employee_id == record.employee_id)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Drops the record with `employee_id`; returns whether one was present.
    pub fn remove(&mut self, employee_id: &str) -> bool {
        let before = self.records.len();
        self.records
            .retain(|record| record.employee_id != employee_id);
        self.records.len() != before
    }
}
