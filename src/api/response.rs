//! JSON response writers

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::error::{ERR_MSG_INVALID_REQ, ERR_MSG_JSON_DECODE};
use super::validation::ValidationErrors;
use super::request::DecodeError;

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

/// Serialize `payload` as the JSON body of a `status` response.
///
/// The body is encoded before anything is written, so an encoding failure
/// still produces a clean 500 response.
pub fn write_with_status<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            tracing::error!("Failed to encode API response into JSON: {}", e);
            write_with_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Write an [`ErrorResponse`] carrying `status` and `message`
pub fn write_with_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        status: status.as_u16(),
        message: message.into(),
    };

    match serde_json::to_vec(&body) {
        Ok(bytes) => json_response(status, bytes),
        Err(e) => {
            tracing::error!("Failed to encode error response into JSON: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// Message for a body that failed to decode. Type mismatches name the field,
/// the expected type and the value received.
pub fn decode_error_message(err: &DecodeError) -> String {
    match err {
        DecodeError::TypeMismatch { field, want, got } => build_decode_error_msg(field, want, got),
        DecodeError::Malformed(_) => ERR_MSG_JSON_DECODE.to_string(),
    }
}

fn build_decode_error_msg(field: &str, want: &str, got: &str) -> String {
    format!("Expected {} to be {}, got {}", field, want, got)
}

/// Message for a body that decoded but broke a field rule
pub fn validation_error_message(errors: &ValidationErrors) -> String {
    errors
        .first_message()
        .unwrap_or_else(|| ERR_MSG_INVALID_REQ.to_string())
}
