//! Shiftboard - user and shift API with JWT session tokens
//!
//! Library interface for the shiftboard backend: token issuance and
//! verification, JSON request decoding, and the user routes.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::Error;
