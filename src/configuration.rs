use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::EmailAddress;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    /// Hosted-database credentials. When absent the process falls back to
    /// in-memory user storage.
    pub supabase: Option<SupabaseSettings>,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    /// Sender mailbox, display-name form allowed ("Portfolio Contact <x@y.z>").
    pub sender: String,
    /// Fixed destination for relayed contact messages.
    pub recipient: String,
    /// Provider API key. Its absence is detected per request, not at startup:
    /// submissions then fail with the configuration-missing response.
    pub api_key: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn recipient(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.recipient.clone())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: Secret<String>,
    pub service_role_key: Option<Secret<String>>,
}

impl SupabaseSettings {
    /// The key used for server-side requests: the elevated key when present
    /// (bypasses row-level security), the anonymous key otherwise.
    pub fn api_key(&self) -> &Secret<String> {
        self.service_role_key.as_ref().unwrap_or(&self.anon_key)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")).required(false))
        // APP_EMAIL_CLIENT__API_KEY=... overrides email_client.api_key etc.
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
