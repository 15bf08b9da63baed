//! Stored user and shift records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User as returned by the API. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user record stamped with the current time
    pub fn new(id: i32, username: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Scheduled shift as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    /// User id taken from the token that created the shift
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Validated shift waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub kind: String,
    pub created_by: i64,
}

impl NewShift {
    pub(crate) fn into_shift(self, id: i32) -> Shift {
        Shift {
            id,
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            created_by: self.created_by,
            created_at: Utc::now(),
        }
    }
}
