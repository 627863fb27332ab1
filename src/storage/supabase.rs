use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::configuration::SupabaseSettings;
use crate::domain::{NewUser, User};
use crate::storage::{StorageError, UserStorage};

const USERS_TABLE: &str = "users";

/// Hosted user store backed by the database's REST interface. One request per
/// operation; an empty result set maps to an absent value, any other provider
/// failure propagates with the provider's message.
pub struct SupabaseStorage {
    http_client: Client,
    users_endpoint: Url,
    api_key: Secret<String>,
}

impl SupabaseStorage {
    /// Uses the elevated key when configured (bypasses row-level security),
    /// the anonymous key otherwise.
    pub fn new(settings: &SupabaseSettings) -> Self {
        let base_url = Url::parse(&settings.url).expect("Failed to parse database url");
        let users_endpoint = base_url
            .join(&format!("/rest/v1/{}", USERS_TABLE))
            .expect("Failed to join users table path with database url");
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build http client");
        Self {
            http_client,
            users_endpoint,
            api_key: settings.api_key().clone(),
        }
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http_client
            .request(method, self.users_endpoint.clone())
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
    }

    async fn fetch_one(&self, column: &str, value: String) -> Result<Option<User>, StorageError> {
        let response = self
            .request(Method::GET)
            .query(&[(column, format!("eq.{}", value)), ("select", "*".into())])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let mut rows: Vec<User> = response.json().await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }
}

/// Maps a non-2xx answer to `StorageError::Database`, keeping the body the
/// provider sent as the error message.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(StorageError::Database(format!("{}: {}", status, detail)))
}

#[async_trait]
impl UserStorage for SupabaseStorage {
    #[tracing::instrument(name = "Fetch user by id", skip(self))]
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        self.fetch_one("id", id.to_string()).await
    }

    #[tracing::instrument(name = "Fetch user by username", skip(self))]
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        self.fetch_one("username", username.to_string()).await
    }

    #[tracing::instrument(name = "Create user", skip(self, user))]
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let record = user.into_user(Uuid::new_v4());
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let mut rows: Vec<User> = response.json().await?;
        rows.pop()
            .ok_or_else(|| StorageError::Database("insert returned no representation".into()))
    }
}
