//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the employee data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Uniqueness of identifier and email is enforced by the schema; constraint
//!   violations surface as `RepoError::Conflict`.
//! - Zero affected rows on update/delete surface as `RepoError::NotFound`.

pub mod employee_repo;
