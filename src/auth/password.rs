//! Password hashing

use crate::error::{Error, Result};

/// Hash a password with the default bcrypt cost
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

/// Hash with an explicit cost. Low costs keep test fixtures fast.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash off the async executor
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Other(format!("password check aborted: {}", e)))?
        .map_err(Error::from)
}
