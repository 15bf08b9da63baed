//! Authentication request and response bodies

use serde::{Deserialize, Serialize};

use crate::api::validation::{Validate, ValidationErrors};
use crate::store::User;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if errors.required("email", &self.email) {
            errors.email("email", &self.email);
        }
        if errors.required("password", &self.password) {
            errors.min_length("password", &self.password, MIN_PASSWORD_LENGTH);
        }
        errors.into_result()
    }
}

/// Login response with token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}
