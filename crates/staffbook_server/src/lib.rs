//! REST API over the employee store.
//!
//! # Responsibility
//! - Expose create/update/delete/list as JSON endpoints under `/api`.
//! - Map the service error taxonomy onto HTTP status codes.
//!
//! # Invariants
//! - Unexpected failures never leak internal detail into response bodies.
//! - One SQL statement runs at a time over the shared connection.

pub mod handlers;
pub mod server;

pub use server::{router, AppState, Server, ServerConfig, ServerError};
