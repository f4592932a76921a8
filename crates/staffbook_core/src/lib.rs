//! Core employee-records logic for staffbook.
//! This crate is the single source of truth for record invariants.

pub mod client;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use client::{EmployeeClient, EmployeeGateway, SubmitOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    Department, Employee, EmployeeId, EmployeeUpdate, EmployeeValidationError, NewEmployee,
};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository, UniqueField,
};
pub use service::employee_service::{EmployeeService, ServiceError, ServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
