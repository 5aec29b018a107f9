//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use studybuddy_types::ErrorReply;

/// An error status with an `{ "error": ... }` body.
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorReply {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn bad_request(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

pub fn internal_error(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}
