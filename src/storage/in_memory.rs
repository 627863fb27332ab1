use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::storage::{StorageError, UserStorage};

/// Process-local user store, used when no hosted-database credentials are
/// configured. Everything is lost on restart. Usernames are not deduplicated:
/// lookups by username return whichever matching record the scan finds first.
#[derive(Default)]
pub struct InMemoryStorage {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStorage for InMemoryStorage {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let users = self.users.lock().expect("user store mutex poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.lock().expect("user store mutex poisoned");
        Ok(users.values().find(|user| user.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let user = user.into_user(Uuid::new_v4());
        let mut users = self.users.lock().expect("user store mutex poisoned");
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
