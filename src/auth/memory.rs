use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{
    repo::{StoreError, UserStore},
    repo_types::User,
};

/// In-process `UserStore` keyed by email, used by the handler tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().expect("users lock").len()
    }

    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .expect("users lock")
            .get(email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn count_by_email(&self, email: &str) -> Result<i64, StoreError> {
        Ok(i64::from(self.users.lock().expect("users lock").contains_key(email)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().expect("users lock").get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.lock().expect("users lock");
        if users.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, StoreError> {
        let mut users = self.users.lock().expect("users lock");
        match users.get_mut(email) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Store whose every call fails, for exercising the 500 paths.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn count_by_email(&self, _email: &str) -> Result<i64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _email: &str, _password_hash: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update_password(&self, _email: &str, _password_hash: &str) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
