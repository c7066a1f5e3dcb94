//! HTTP error type shared by every handler and extractor.
//!
//! Every failure leaves the API as `{"error": "<message>", "code": "<CODE>"}`
//! with the matching status. Internal details are logged and never sent.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lemon_core::error::CoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request body or parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire format of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

type ErrorParts = (StatusCode, &'static str, String);

/// PostgreSQL SQLSTATE for a value that overflows its column's precision.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

impl AppError {
    fn parts(&self) -> ErrorParts {
        match self {
            AppError::Core(err) => core_parts(err),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundMessage(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// Constraint violations and numeric overflow are the client's fault
/// (duplicate username, an id that references nothing, an amount too large
/// to store); anything else is ours.
fn database_parts(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let Some(db_err) = err.as_database_error() {
        let constraint = db_err.constraint().unwrap_or("unknown");
        if db_err.is_unique_violation() {
            return (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Duplicate value violates unique constraint: {constraint}"),
            );
        }
        if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Numeric value is out of range".to_string(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Operation violates reference constraint: {constraint}"),
            );
        }
    }

    internal(err)
}

fn internal(detail: &dyn Display) -> ErrorParts {
    tracing::error!(error = %detail, "Request failed with an internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
