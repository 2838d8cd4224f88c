use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use oneway_core::error::{ConflictKind, CoreError};
use serde_json::json;

use crate::auth::session::SessionStoreError;
use crate::auth::token::IssueError;

/// Constraint backing the one-booking-per-seat rule.
const SEAT_UNIQUE_CONSTRAINT: &str = "uq_bookings_showtime_seat";

/// Constraint backing the hall scheduling window.
const HALL_WINDOW_CONSTRAINT: &str = "ex_showtimes_hall_window";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `oneway_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ConflictKind> for AppError {
    fn from(kind: ConflictKind) -> Self {
        AppError::Core(CoreError::Conflict(kind))
    }
}

impl From<SessionStoreError> for AppError {
    fn from(err: SessionStoreError) -> Self {
        AppError::InternalError(format!("Session store error: {err}"))
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        AppError::InternalError(format!("Token issue failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(kind) => conflict(*kind),
                CoreError::Unauthorized(_) => return unauthorized(),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 401 responses carry no detail about which check failed.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "status": "unauthorized" })),
    )
        .into_response()
}

fn conflict(kind: ConflictKind) -> (StatusCode, &'static str, String) {
    (StatusCode::BAD_REQUEST, kind.code(), kind.to_string())
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - The seat and hall-window constraints map to their conflict errors (400),
///   so a write that raced past the pre-check reports the same error.
/// - Other unique constraint violations (`uq_*`) map to 409.
/// - Foreign key and check violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") if constraint == SEAT_UNIQUE_CONSTRAINT => {
                    return conflict(ConflictKind::OverlappingSeat);
                }
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // exclusion_violation
                Some("23P01") if constraint == HALL_WINDOW_CONSTRAINT => {
                    return conflict(ConflictKind::OverlappingShowtime);
                }
                // foreign_key_violation
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        "Referenced entity does not exist".to_string(),
                    );
                }
                // check_violation
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
