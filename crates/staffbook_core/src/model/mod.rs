//! Employee record model.
//!
//! # Responsibility
//! - Define the flat employee record persisted by the store.
//! - Define the create/update payload shapes and their presence checks.
//!
//! # Invariants
//! - `employee_id` is externally assigned and immutable after creation.
//! - A persisted record never has an empty field.

pub mod employee;
