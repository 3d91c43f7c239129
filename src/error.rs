use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error types with appropriate HTTP status codes.
///
/// # Storage Errors
///
/// `StorageUnavailable` covers every failure of the backing store: a SQLite
/// file that cannot be opened, a failed statement, a poisoned connection
/// lock. At startup it is fatal; during a request it becomes a 503.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::StorageUnavailable(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::MalformedInput(sanitize_json_rejection(&rejection))
    }
}

/// Error response body for API endpoints.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => {
                tracing::debug!(error = %self, "Resource not found");
                (StatusCode::NOT_FOUND, "not_found", msg.as_str())
            }
            AppError::MalformedInput(msg) => {
                tracing::warn!(error = %self, "Rejected request body");
                (StatusCode::BAD_REQUEST, "malformed_input", msg.as_str())
            }
            AppError::PayloadTooLarge(_) => {
                tracing::warn!(error = %self, "Rejected request body");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "payload_too_large",
                    "Request body exceeds the configured size limit.",
                )
            }

            // Never expose storage or internal details to clients
            AppError::StorageUnavailable(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage_unavailable",
                    "Coffee storage is temporarily unavailable. Please try again later.",
                )
            }
            AppError::ConfigError(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config_error",
                    "Service configuration error. Please contact support.",
                )
            }
            AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred. Please contact support if the issue persists.",
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: message.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Turn an axum JSON rejection into a client-facing message.
///
/// Serde messages name internal struct and field types, so only the useful
/// part (the offending field, or the broad failure class) is kept.
fn sanitize_json_rejection(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
        JsonRejection::JsonDataError(e) => sanitize_data_error(&e.body_text()),
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid request format".to_string(),
    }
}

fn sanitize_data_error(msg: &str) -> String {
    if let Some(field) = backticked(msg, "missing field") {
        return format!("Missing required field: {field}");
    }

    if msg.contains("invalid type") {
        return "Invalid data type in request body".to_string();
    }

    "Invalid request format".to_string()
}

/// First backtick-quoted token following `marker` in `msg`.
fn backticked<'a>(msg: &'a str, marker: &str) -> Option<&'a str> {
    let after = msg.get(msg.find(marker)? + marker.len()..)?;
    let start = after.find('`')? + 1;
    let rest = after.get(start..)?;
    let end = rest.find('`')?;
    rest.get(..end)
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_missing_field() {
        let msg = "Failed to deserialize the JSON body into the target type: \
                   missing field `name` at line 1 column 2";
        assert_eq!(sanitize_data_error(msg), "Missing required field: name");
    }

    #[test]
    fn test_sanitize_invalid_type() {
        let msg = "name: invalid type: integer `42`, expected a string at line 1 column 11";
        assert_eq!(
            sanitize_data_error(msg),
            "Invalid data type in request body"
        );
    }

    #[test]
    fn test_sanitize_fallback() {
        assert_eq!(sanitize_data_error("something odd"), "Invalid request format");
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("coffee 'x'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_unavailable_status() {
        let response = AppError::StorageUnavailable("disk gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_malformed_input_status() {
        let response = AppError::MalformedInput("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rusqlite_error_maps_to_storage_unavailable() {
        let err: AppError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
