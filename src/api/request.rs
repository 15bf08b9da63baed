//! Request body decoding and validation

use std::sync::LazyLock;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::error::{ApiError, ERR_MSG_JSON_DECODE};
use super::response::{decode_error_message, validation_error_message};
use super::validation::Validate;

// The received value is quoted input and may itself contain ", expected ", so
// the split is anchored on the last occurrence.
static TYPE_MISMATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^invalid (?:type|value): (.+), expected (.+?)(?: at line \d+ column \d+)?$")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

/// Why a body could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field held a value of the wrong type
    TypeMismatch { field: String, want: String, got: String },
    /// Syntax errors, truncated bodies, missing or unknown fields
    Malformed(String),
}

impl DecodeError {
    fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let inner = err.into_inner();

        if inner.classify() == Category::Data {
            if let Some(caps) = TYPE_MISMATCH.captures(&inner.to_string()) {
                let field = if path == "." {
                    "request body".to_string()
                } else {
                    path
                };
                return DecodeError::TypeMismatch {
                    field,
                    want: caps[2].to_string(),
                    got: caps[1].to_string(),
                };
            }
        }

        DecodeError::Malformed(inner.to_string())
    }
}

/// Decode a JSON body into `T`, tracking the path of the failing field
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut de).map_err(DecodeError::from_path_error)?;
    de.end().map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Ok(value)
}

/// Decode `body` into `T` and run its validation rules.
///
/// Either failure is terminal for the request: the returned error renders as
/// the 400 response.
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = decode(body).map_err(|e| {
        tracing::debug!("api: failed to decode request: {:?}", e);
        ApiError::Decode(decode_error_message(&e))
    })?;

    value.validate().map_err(|e| {
        tracing::debug!("api: failed to validate input: {}", e);
        ApiError::Validation(validation_error_message(&e))
    })?;

    Ok(value)
}

/// JSON body extractor that rejects undecodable or invalid payloads with 400
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("api: failed to read request body: {}", e);
            ApiError::Decode(ERR_MSG_JSON_DECODE.to_string())
        })?;

        decode_and_validate(&body).map(ValidJson)
    }
}
