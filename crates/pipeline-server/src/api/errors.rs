//! Error handling for the Pipeline Server API
//!
//! This module contains standardized error responses for the API.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Not found (404)
    NotFound(String),
    /// Unsupported media type (415)
    UnsupportedMediaType(String),
    /// Payload too large (413)
    PayloadTooLarge(String),
    /// Unprocessable entity (422)
    UnprocessableEntity(String),
    /// Any other rejection raised while reading the request
    Rejected(StatusCode, String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected(status, _) => *status,
        }
    }

    /// Stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "ERR_BAD_REQUEST",
            ApiError::NotFound(_) => "ERR_NOT_FOUND",
            ApiError::UnsupportedMediaType(_) => "ERR_UNSUPPORTED_MEDIA_TYPE",
            ApiError::PayloadTooLarge(_) => "ERR_PAYLOAD_TOO_LARGE",
            ApiError::UnprocessableEntity(_) => "ERR_VALIDATION_ERROR",
            ApiError::Rejected(..) => "ERR_REQUEST_REJECTED",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::Rejected(_, msg) => msg,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::UnsupportedMediaType(msg) => write!(f, "Unsupported Media Type: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
            ApiError::UnprocessableEntity(msg) => write!(f, "Unprocessable Entity: {}", msg),
            ApiError::Rejected(status, msg) => write!(f, "{}: {}", status, msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(message),
            JsonRejection::JsonSyntaxError(_) => ApiError::BadRequest(message),
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(message),
            // Body read failures keep axum's status (413 past the body limit)
            _ if status == StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(message),
            _ => ApiError::Rejected(status, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(error = %self, "Rejecting request");

        let status = self.status();
        let error_code = self.error_code();
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "errorDetails": {
                "errorCode": error_code,
                "errorMessage": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_codes() {
        let err = ApiError::UnprocessableEntity("missing field `edges`".to_string());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "ERR_VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Unprocessable Entity: missing field `edges`");

        let err = ApiError::NotFound("/nope".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ERR_NOT_FOUND");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::BadRequest("broken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::PayloadTooLarge("too big".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_other_rejections_keep_their_status() {
        let err = ApiError::Rejected(StatusCode::REQUEST_TIMEOUT, "slow body".to_string());
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.error_code(), "ERR_REQUEST_REJECTED");
        assert_eq!(err.to_string(), "408 Request Timeout: slow body");
    }
}
