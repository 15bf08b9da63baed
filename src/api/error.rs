//! Per-request API errors and the messages clients see

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::response::write_with_error;
use crate::auth::TokenError;
use crate::store::StoreError;

pub const ERR_USER_NOT_FOUND: &str = "user not found";
pub const ERR_UNAUTHORIZED: &str = "unauthorized";
pub const ERR_INVALID_CREDENTIALS: &str = "invalid credentials";
pub const ERR_MSG_JSON_DECODE: &str = "error decoding JSON request body";
pub const ERR_MSG_INVALID_REQ: &str = "invalid request";

/// Terminal failure for a single request. Rendering it writes the JSON error
/// body with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", ERR_UNAUTHORIZED)]
    Unauthorized,

    #[error("{}", ERR_INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken(#[from] TokenError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized | ApiError::InvalidCredentials | ApiError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a user lookup failure. Internal error text is passed through as-is.
    pub fn from_lookup(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()),
            other => {
                tracing::error!("User lookup failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        write_with_error(self.status(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Decode("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken(TokenError::Expired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_lookup_not_found_uses_literal_message() {
        let err = ApiError::from_lookup(StoreError::NotFound);
        assert_eq!(err.to_string(), "user not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_lookup_failure_passes_text_through() {
        let err = ApiError::from_lookup(StoreError::Unavailable("connection reset".into()));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
