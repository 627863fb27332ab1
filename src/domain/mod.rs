mod contact_message;
mod email_address;
mod user;

pub use contact_message::{ContactFormData, ContactMessage, ValidationErrors};
pub use email_address::EmailAddress;
pub use user::{NewUser, User};
