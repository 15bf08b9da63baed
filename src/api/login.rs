//! Login handler

use axum::{extract::State, http::StatusCode, response::Response};

use super::error::ApiError;
use super::request::ValidJson;
use super::response::write_with_status;
use super::server::SharedState;
use crate::auth::{verify_password, LoginRequest, LoginResponse};
use crate::store::StoreError;

/// `POST /auth/login`: exchange email and password for a session token
pub async fn login(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = match state.users.get_user_by_email(&req.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            tracing::info!("Login attempt for unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => {
            tracing::error!("User lookup failed during login: {}", e);
            return Err(ApiError::Internal(e.to_string()));
        }
    };

    let matches = verify_password(req.password, user.password_hash.clone())
        .await
        .map_err(|e| {
            tracing::error!("Password check failed for user {}: {}", user.id, e);
            ApiError::Internal(e.to_string())
        })?;

    if !matches {
        tracing::info!("Wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(i64::from(user.id)).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    tracing::info!("User {} logged in", user.id);

    let body = LoginResponse {
        token,
        expires_in: state.tokens.max_age().num_seconds(),
        user,
    };
    Ok(write_with_status(StatusCode::OK, &body))
}
