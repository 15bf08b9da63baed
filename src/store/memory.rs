//! In-memory user and shift stores

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{NewShift, Shift, ShiftStore, StoreError, User, UserStore};

/// User store backed by a map. Used when no database is configured and in tests.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<BTreeMap<i32, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Insert or replace a user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self, id: i32) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

/// Shift store backed by a map keyed by id
#[derive(Clone, Default)]
pub struct MemoryShiftStore {
    shifts: Arc<RwLock<BTreeMap<i32, Shift>>>,
}

impl MemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShiftStore for MemoryShiftStore {
    async fn create_shift(&self, shift: NewShift) -> Result<Shift, StoreError> {
        let mut shifts = self.shifts.write().await;
        let id = match shifts.keys().next_back() {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| StoreError::Unavailable("shift ids exhausted".to_string()))?,
            None => 1,
        };

        let shift = shift.into_shift(id);
        shifts.insert(id, shift.clone());
        Ok(shift)
    }

    async fn get_shifts(&self) -> Result<Vec<Shift>, StoreError> {
        let mut shifts: Vec<Shift> = self.shifts.read().await.values().cloned().collect();
        shifts.sort_by_key(|s| (s.start_time, s.id));
        Ok(shifts)
    }
}
