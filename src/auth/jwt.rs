//! JWT token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::AuthConfig;

/// Algorithms accepted by [`TokenService::verify`]. Anything outside the HMAC
/// family is rejected before the signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("unexpected signing method: {0}")]
    UnexpectedAlgorithm(String),

    #[error("token has expired")]
    Expired,

    #[error("issue parsing token: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("invalid token: userID claim is missing or not an integer")]
    InvalidToken,

    #[error("token expiry out of range: {0} after {1}")]
    ExpiryOutOfRange(Duration, DateTime<Utc>),
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Caller identity. Kept loose so a wrong-typed claim is reported as an
    /// invalid token rather than a decode failure.
    #[serde(rename = "userID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id` expiring `max_age` after `now`
    pub fn new(user_id: i64, now: DateTime<Utc>, max_age: Duration) -> Result<Self, TokenError> {
        let exp = now
            .checked_add_signed(max_age)
            .ok_or(TokenError::ExpiryOutOfRange(max_age, now))?;

        Ok(Self {
            user_id: Some(Value::from(user_id)),
            exp: exp.timestamp(),
        })
    }

    /// Integral user id, if present
    pub fn user_id(&self) -> Option<i64> {
        match self.user_id.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    max_age: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            // Out-of-range ages saturate and surface as ExpiryOutOfRange on issue
            max_age: Duration::try_hours(config.token_max_age_hours).unwrap_or(Duration::MAX),
        }
    }

    /// Token lifetime
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Create a token for `user_id` that expires after the configured max age
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Create a token as if it had been issued at `now`
    pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, now, self.max_age)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Validate a token and return the user id it carries
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let header = decode_header(token).map_err(TokenError::Invalid)?;
        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm(format!("{:?}", header.alg)),
            _ => TokenError::Invalid(e),
        })?;

        data.claims.user_id().ok_or(TokenError::InvalidToken)
    }
}
