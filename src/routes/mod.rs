mod contact;
mod health_check;

pub use contact::{contact, method_not_allowed, ContactError};
pub use health_check::health_check;
