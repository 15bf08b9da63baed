//! HTTP API

pub mod error;
pub mod login;
pub mod request;
pub mod response;
pub mod server;
pub mod shifts;
pub mod users;
pub mod validation;

pub use error::ApiError;
pub use request::{decode_and_validate, ValidJson};
pub use response::{write_with_error, write_with_status, ErrorResponse};
pub use server::*;
pub use validation::{Validate, ValidationErrors};
