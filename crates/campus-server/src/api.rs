//! Shared API plumbing: error mapping and blocking database access.

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_db::DbPool;
use campus_dining::DiningError;
use rusqlite::Connection;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// `RestaurantNotFound` → 404, everything else → 500 (with error logged).
impl From<DiningError> for ApiError {
    fn from(e: DiningError) -> Self {
        match e {
            DiningError::RestaurantNotFound(id) => {
                ApiError::NotFound(format!("restaurant {} doesn't exist", id))
            }
            DiningError::Database(err) => {
                tracing::error!(error = %err, "dining database operation failed");
                ApiError::InternalServerError(format!("db query failed: {}", err))
            }
        }
    }
}

/// Returns true if the error is a SQLite constraint violation (e.g. a
/// foreign key that no longer resolves).
pub(crate) fn is_constraint_violation(e: &DiningError) -> bool {
    matches!(
        e,
        DiningError::Database(rusqlite::Error::SqliteFailure(code, _))
            if code.code == rusqlite::ffi::ErrorCode::ConstraintViolation
    )
}

/// Runs `f` on the blocking thread pool with a connection checked out from
/// `pool`.
///
/// `op` names the operation in log output.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, op: &'static str, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, op, "failed to get db connection");
            ApiError::InternalServerError(format!("db connection failed: {}", e))
        })?;
        f(&*conn)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, op, "task join error");
        ApiError::InternalServerError(format!("task join error: {}", e))
    })?
}
