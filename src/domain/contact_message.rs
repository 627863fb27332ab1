use std::collections::BTreeMap;

use crate::domain::EmailAddress;

const NAME_REQUIRED: &str = "Нэрээ оруулна уу";
const EMAIL_INVALID: &str = "Зөв имэйл хаяг оруулна уу";
const SUBJECT_REQUIRED: &str = "Гарчиг оруулна уу";
const MESSAGE_TOO_SHORT: &str = "Мессеж хамгийн багадаа 10 тэмдэгт байна";

/// Raw contact-form submission, straight out of the request body.
#[derive(serde::Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact submission that satisfies every schema constraint.
/// Transient: built per request, handed to the relay, then dropped.
#[derive(Debug)]
pub struct ContactMessage {
    name: String,
    email: EmailAddress,
    subject: String,
    message: String,
}

impl ContactMessage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Field-keyed validation failures. Serializes to
/// `{"name": ["..."], "email": ["..."]}` — the shape the form expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().copied()
    }
}

impl TryFrom<ContactFormData> for ContactMessage {
    type Error = ValidationErrors;

    /// Checks every constraint and reports all violations at once, keyed by
    /// field, rather than stopping at the first failure.
    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::default();
        if form.name.is_empty() {
            errors.add("name", NAME_REQUIRED);
        }
        let email = match EmailAddress::parse(form.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.add("email", EMAIL_INVALID);
                None
            }
        };
        if form.subject.is_empty() {
            errors.add("subject", SUBJECT_REQUIRED);
        }
        if form.message.chars().count() < 10 {
            errors.add("message", MESSAGE_TOO_SHORT);
        }
        match (email, errors.is_empty()) {
            (Some(email), true) => Ok(Self {
                name: form.name,
                email,
                subject: form.subject,
                message: form.message,
            }),
            _ => Err(errors),
        }
    }
}
