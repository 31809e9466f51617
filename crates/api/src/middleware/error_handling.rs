//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way: `{ "error": "<message>" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;
use tracing::error;
use where2tattoo_core::errors::TimeError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use where2tattoo_api::middleware::error_handling::AppError;
/// use where2tattoo_core::errors::TimeError;
///
/// async fn handler(slug: String) -> Result<Json<String>, AppError> {
///     if slug.is_empty() {
///         return Err(AppError(TimeError::NotFound("Studio not found".to_string())));
///     }
///     Ok(Json(slug))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimeError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TimeError::NotFound(_) => StatusCode::NOT_FOUND,
            TimeError::Validation(_) => StatusCode::BAD_REQUEST,
            TimeError::Conflict(_) => StatusCode::CONFLICT,
            TimeError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TimeError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `TimeResult` inside handlers.
impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        AppError(err)
    }
}

/// Repository calls return `eyre::Report`; those are storage failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimeError::Database(err))
    }
}

/// Maps a TimeError to an HTTP response
pub fn map_error(err: TimeError) -> Response {
    AppError(err).into_response()
}

/// Converts failures of the timeout layer into responses.
pub async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
            .into_response()
    } else {
        map_error(TimeError::Internal(err))
    }
}
