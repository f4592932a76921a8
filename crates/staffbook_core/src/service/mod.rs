//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the employee lifecycle operations.
//! - Map persistence outcomes onto the caller-facing error taxonomy.

pub mod employee_service;
