use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use boom_cloud::MediaError;
use boom_core::error::CoreError;
use serde_json::json;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`]; database and media-store
/// failures are wrapped as they are. The [`IntoResponse`] impl renders all of
/// them as `{"error": <message>, "code": <CODE>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("sqlx: {0}")]
    Database(#[from] sqlx::Error),

    /// The media store failed or rejected an upload.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Malformed request that never reached domain validation (bad multipart,
    /// unreadable field).
    #[error("{0}")]
    BadRequest(String),

    #[error("internal: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Message shown in place of any internal failure.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

type ErrorParts = (StatusCode, &'static str, String);

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Media(err) => {
                tracing::error!(error = %err, "Media store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MEDIA_STORE_ERROR",
                    err.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Unhandled failure");
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

fn classify_core_error(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Domain invariant broken");
            internal()
        }
    }
}

/// `RowNotFound` is a 404 and a unique violation (23505) on one of our `uq_*`
/// constraints is a 409. Anything else is logged and hidden behind a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found".to_string(),
        );
    }

    let unique_constraint = err
        .as_database_error()
        .filter(|db_err| db_err.code().as_deref() == Some("23505"))
        .and_then(|db_err| db_err.constraint())
        .filter(|name| name.starts_with("uq_"));

    if let Some(constraint) = unique_constraint {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Already exists: {constraint}"),
        );
    }

    tracing::error!(error = %err, "Query failed");
    internal()
}
