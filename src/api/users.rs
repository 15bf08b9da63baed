//! User route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use super::error::{ApiError, ERR_USER_NOT_FOUND};
use super::response::write_with_status;
use super::server::{AppState, SharedState};
use crate::auth::AuthUser;

/// `GET /users/{id}`
///
/// An id that does not parse as a 32-bit integer is answered with 500 and
/// the parse error text.
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: i32 = id.parse().map_err(|e: std::num::ParseIntError| {
        tracing::debug!("Rejected user id {:?}: {}", id, e);
        ApiError::Internal(e.to_string())
    })?;

    find_user(&state, id).await
}

/// `GET /users/`
pub async fn get_users(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let users = state.users.get_users().await.map_err(|e| {
        tracing::error!("Failed to list users: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    Ok(write_with_status(StatusCode::OK, &users))
}

/// `GET /users/me`, behind the auth guard
pub async fn get_me(State(state): State<SharedState>, auth: AuthUser) -> Result<Response, ApiError> {
    // Ids outside the stored range cannot belong to anyone
    let id = i32::try_from(auth.user_id).map_err(|_| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))?;

    find_user(&state, id).await
}

async fn find_user(state: &AppState, id: i32) -> Result<Response, ApiError> {
    let user = state.users.get_user(id).await.map_err(ApiError::from_lookup)?;
    Ok(write_with_status(StatusCode::OK, &user))
}
