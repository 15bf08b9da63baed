//! Authentication: session tokens, the bearer guard and password hashing

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{bearer_token, require_auth, AuthUser};
pub use models::{LoginRequest, LoginResponse};
pub use password::{hash_password, hash_password_with_cost, verify_password};
