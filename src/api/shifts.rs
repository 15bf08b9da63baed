//! Shift route handlers

use axum::{extract::State, http::StatusCode, response::Response};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::{ApiError, ERR_MSG_INVALID_REQ};
use super::request::ValidJson;
use super::response::write_with_status;
use super::server::SharedState;
use super::validation::{Validate, ValidationErrors};
use crate::auth::AuthUser;
use crate::store::NewShift;

pub const MAX_SHIFT_TYPE_LENGTH: usize = 64;

/// Body of `POST /shifts`. Times are RFC 3339 strings.
#[derive(Debug, Deserialize)]
pub struct CreateShiftRequest {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Validate for CreateShiftRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.present("start_time", &self.start_time);
        errors.present("end_time", &self.end_time);
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time) {
            errors.after("end_time", end, "start_time", start);
        }

        if errors.required("type", &self.kind) {
            errors.max_length("type", &self.kind, MAX_SHIFT_TYPE_LENGTH);
        }

        errors.into_result()
    }
}

impl CreateShiftRequest {
    fn into_new_shift(self, created_by: i64) -> Option<NewShift> {
        Some(NewShift {
            start_time: self.start_time?,
            end_time: self.end_time?,
            kind: self.kind.trim().to_string(),
            created_by,
        })
    }
}

/// `POST /shifts`, behind the auth guard
pub async fn create_shift(
    State(state): State<SharedState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<CreateShiftRequest>,
) -> Result<Response, ApiError> {
    let new_shift = request
        .into_new_shift(auth.user_id)
        .ok_or_else(|| ApiError::Validation(ERR_MSG_INVALID_REQ.to_string()))?;

    let shift = state.shifts.create_shift(new_shift).await.map_err(|e| {
        tracing::error!("Failed to create shift: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    tracing::info!("User {} created shift {}", auth.user_id, shift.id);
    Ok(write_with_status(StatusCode::CREATED, &shift))
}

/// `GET /shifts`, behind the auth guard
pub async fn get_shifts(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let shifts = state.shifts.get_shifts().await.map_err(|e| {
        tracing::error!("Failed to list shifts: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    Ok(write_with_status(StatusCode::OK, &shifts))
}
