mod in_memory;
mod supabase;

pub use in_memory::InMemoryStorage;
pub use supabase::SupabaseStorage;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::configuration::SupabaseSettings;
use crate::domain::{NewUser, User};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The database service answered with an error; carries its message.
    #[error("database request failed: {0}")]
    Database(String),
    #[error("database transport error")]
    Transport(#[from] reqwest::Error),
}

/// User persistence contract. "No such record" is `Ok(None)`, never an error.
#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StorageError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    /// Assigns a fresh id and stores the record. The returned record is
    /// retrievable by that id and by username from then on.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;
}

/// Backend selection, made once at startup: hosted database when credentials
/// are configured, process-local memory otherwise.
pub fn user_storage(settings: Option<&SupabaseSettings>) -> Arc<dyn UserStorage> {
    match settings {
        Some(supabase) => Arc::new(SupabaseStorage::new(supabase)),
        None => Arc::new(InMemoryStorage::default()),
    }
}
