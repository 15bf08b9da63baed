//! User and shift data access

mod memory;
mod models;
mod postgres;

pub use memory::{MemoryShiftStore, MemoryUserStore};
pub use models::{NewShift, Shift, User};
pub use postgres::PostgresStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("{0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Read access to stored users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a single user, [`StoreError::NotFound`] when absent
    async fn get_user(&self, id: i32) -> Result<User, StoreError>;

    /// All users ordered by id
    async fn get_users(&self) -> Result<Vec<User>, StoreError>;

    /// Lookup used by login
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;
}

/// Shift records
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Persist a shift and return it with its assigned id
    async fn create_shift(&self, shift: NewShift) -> Result<Shift, StoreError>;

    /// All shifts ordered by start time, then id
    async fn get_shifts(&self) -> Result<Vec<Shift>, StoreError>;
}
