//! Handler errors and their JSON rendering.
//!
//! Every failure leaves the server as `{ "error": <message>, "code": <CODE> }`.
//! Internal details are logged and replaced with a fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use placement_core::error::CoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Status, machine-readable code and client-facing message.
type Rendered = (StatusCode, &'static str, String);

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Database(err) => classify_sqlx_error(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.render();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn internal() -> Rendered {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Map a sqlx error onto the response a client should see.
///
/// Constraint violations are client errors: a taken `uq_` key is 409, a
/// missing referenced row (unknown student, location, ...) or a failed
/// `CHECK` is 400. `RowNotFound` is 404. Anything else is a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Rendered {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match (db_err.code().as_deref(), constraint) {
        (Some("23505"), c) if c.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("A row with this value already exists ({c})"),
        ),
        (Some("23503"), c) => (
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            format!("Referenced row does not exist ({c})"),
        ),
        (Some("23514"), c) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value rejected by check constraint ({c})"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}
