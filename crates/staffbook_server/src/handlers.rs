//! Endpoint handlers for the employee API.
//!
//! Every response body carries `{"message": ...}`; successful writes also
//! carry the stored `employee`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde::Serialize;
use staffbook_core::service::employee_service::{
    CREATED_MESSAGE, REMOVED_MESSAGE, UPDATED_MESSAGE,
};
use staffbook_core::{Employee, EmployeeUpdate, EmployeeValidationError, NewEmployee, ServiceError};

use crate::server::AppState;

const INVALID_BODY_MESSAGE: &str = "Invalid request body";

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    employee: Option<Employee>,
}

impl MessageBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            employee: None,
        }
    }

    fn with_employee(message: impl Into<String>, employee: Employee) -> Self {
        Self {
            message: message.into(),
            employee: Some(employee),
        }
    }
}

fn message_response(status: StatusCode, body: MessageBody) -> Response {
    (status, Json(body)).into_response()
}

/// Maps a service failure to its status code. `failure_message` replaces the
/// detail of unexpected failures.
fn error_response(err: &ServiceError, failure_message: &str) -> Response {
    let status = match err {
        ServiceError::Validation(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if err.is_user_facing() {
        err.to_string()
    } else {
        error!("event=http_error module=handlers status=error error={err}");
        failure_message.to_string()
    };

    message_response(status, MessageBody::new(message))
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    warn!("event=http_body module=handlers status=rejected reason=\"{rejection}\"");
    message_response(StatusCode::BAD_REQUEST, MessageBody::new(INVALID_BODY_MESSAGE))
}

pub async fn health() -> &'static str {
    "OK"
}

/// `GET /api/employees`
pub async fn list_employees(State(state): State<Arc<AppState>>) -> Response {
    match state.with_service(|service| service.list_employees()).await {
        Ok(employees) => Json(employees).into_response(),
        Err(err) => error_response(&err, "Server error"),
    }
}

/// `POST /api/employees` and `POST /api/employees/add`
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state
        .with_service(move |service| service.create_employee(payload))
        .await
    {
        Ok(employee) => message_response(
            StatusCode::CREATED,
            MessageBody::with_employee(CREATED_MESSAGE, employee),
        ),
        Err(err) => error_response(&err, "Server error"),
    }
}

/// `PUT /api/employees/:employee_id`
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Response {
    let Json(changes) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state
        .with_service(move |service| service.update_employee(&employee_id, changes))
        .await
    {
        Ok(employee) => message_response(
            StatusCode::OK,
            MessageBody::with_employee(UPDATED_MESSAGE, employee),
        ),
        Err(err) => error_response(&err, "Update failed"),
    }
}

/// `DELETE /api/employees/:employee_id`
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> Response {
    match state
        .with_service(move |service| service.delete_employee(&employee_id))
        .await
    {
        Ok(()) => message_response(StatusCode::OK, MessageBody::new(REMOVED_MESSAGE)),
        Err(err) => error_response(&err, "Deletion failed"),
    }
}

/// `DELETE /api/employees` with no identifier segment.
pub async fn delete_without_id() -> Response {
    error_response(
        &ServiceError::Validation(EmployeeValidationError::MissingEmployeeId),
        "Deletion failed",
    )
}
