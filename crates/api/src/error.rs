use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::models::job_number::FormatError;
use domain::services::assignment::AssignmentError;
use domain::services::job_assembly::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required field was missing at finalize time; carries the field
    /// name so the client can highlight it inline.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The sequence allocator could not issue a number.
    #[error("Job number allocation unavailable: {0}")]
    AllocationUnavailable(String),

    /// Assignment hard-blocked (candidate unavailable).
    #[error("Assignment blocked: {0}")]
    AssignmentBlocked(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, field) = match self {
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg, None)
            }
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("Missing required field: {}", field),
                Some(field),
            ),
            ApiError::AllocationUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "allocation_unavailable",
                msg,
                None,
            ),
            ApiError::AssignmentBlocked(msg) => {
                (StatusCode::CONFLICT, "assignment_blocked", msg, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.clone().map(|m| m.to_string()).unwrap_or_default()
                    )
                })
            })
            .collect();
        ApiError::Validation(messages.join(", "))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::MissingField(err.field.to_string())
    }
}

impl From<crate::services::finalize::FinalizeError> for ApiError {
    fn from(err: crate::services::finalize::FinalizeError) -> Self {
        use crate::services::finalize::FinalizeError;
        match err {
            FinalizeError::DraftNotPersisted => ApiError::Validation(err.to_string()),
            FinalizeError::Validation(e) => e.into(),
            FinalizeError::Allocation(e) => ApiError::AllocationUnavailable(e.to_string()),
            FinalizeError::Save(e) => ApiError::Internal(e.to_string()),
            FinalizeError::Database(e) => e.into(),
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        ApiError::AssignmentBlocked(err.to_string())
    }
}

impl From<FormatError> for ApiError {
    fn from(err: FormatError) -> Self {
        // A malformed stored job number is corrupt data, never coerced.
        tracing::error!(error = %err, "Corrupt job number encountered");
        ApiError::Internal(err.to_string())
    }
}
