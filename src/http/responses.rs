//! HTTP response bodies
//!
//! JSON payloads returned by the handlers and the error type that turns
//! storage failures into responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::StorageError;
use crate::error::handlers::{handle_error, status_for};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Outcome of an upload or delete
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_result(success: bool) -> Self {
        Self {
            success,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub markers: Vec<String>,
}

/// Failed request, rendered as `{"success": false, "error": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        handle_error(&err);
        let status = status_for(&err);
        // Keep I/O details in the log, not in the response
        let message = match err {
            StorageError::IoError(_) => "Storage operation failed".to_string(),
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Content type for a served file, guessed from its extension
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for("island.png"), "image/png");
        assert_eq!(content_type_for("island.JPG"), "image/jpeg");
        assert_eq!(content_type_for("pin.svg"), "image/svg+xml");
        assert_eq!(content_type_for("island.png.json"), "application/json");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn test_storage_errors_map_to_status() {
        let err = ApiError::from(StorageError::InvalidCategory("tiles".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Invalid category: tiles");

        let err = ApiError::from(StorageError::IoError(std::io::Error::other("disk on fire")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("disk on fire"));
    }

    #[test]
    fn test_action_response_shape() {
        let json = serde_json::to_value(ActionResponse::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));

        let json = serde_json::to_value(ActionResponse::with_result(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false }));
    }
}
