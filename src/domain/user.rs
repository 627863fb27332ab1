use uuid::Uuid;

use crate::domain::ValidationErrors;

const USERNAME_REQUIRED: &str = "Хэрэглэгчийн нэр оруулна уу";
const PASSWORD_REQUIRED: &str = "Нууц үг оруулна уу";

/// A stored user record. The id is assigned by the storage layer at creation.
/// The password is kept in plain form; hashing is out of scope for this
/// surface and the record never travels over the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// User fields as supplied by a caller, before an id exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    username: String,
    password: String,
}

impl NewUser {
    /// Both fields must be non-empty; violations are reported together,
    /// keyed by field, like the contact-form schema.
    pub fn parse(username: String, password: String) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if username.is_empty() {
            errors.add("username", USERNAME_REQUIRED);
        }
        if password.is_empty() {
            errors.add("password", PASSWORD_REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Attaches a freshly assigned id, producing the stored record.
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
