use std::fmt::{Debug, Formatter};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use htmlescape::encode_minimal;

use crate::domain::{ContactFormData, ContactMessage, ValidationErrors};
use crate::email_client::{EmailClient, EmailClientError};
use crate::error_handling::error_chain_fmt;

/// Everything that can go wrong while relaying a submission. The `#[error]`
/// strings double as the user-facing response messages; which kind of failure
/// occurred is only distinguishable from the server-side logs.
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Оролтын мэдээлэл буруу байна")]
    Validation(ValidationErrors),
    #[error("Имэйл илгээх тохиргоо дутуу байна")]
    MissingConfiguration,
    #[error("Имэйл илгээхэд алдаа гарлаа")]
    Delivery(#[source] reqwest::Error),
    #[error("Серверийн алдаа гарлаа")]
    Unexpected(#[from] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::MissingConfiguration
            | ContactError::Delivery(_)
            | ContactError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::Validation(errors) => HttpResponse::BadRequest().json(
                serde_json::json!({ "message": self.to_string(), "errors": errors }),
            ),
            // 500 bodies carry the message only, never internal detail.
            _ => HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "message": self.to_string() })),
        }
    }
}

#[tracing::instrument(
    name = "Relay a contact submission",
    skip(form, email_client),
    fields(
        submitter_email = %form.email,
        subject = %form.subject
    )
)]
pub async fn contact(
    form: web::Json<ContactFormData>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, ContactError> {
    let message = ContactMessage::try_from(form.into_inner()).map_err(ContactError::Validation)?;

    send_contact_email(&email_client, &message)
        .await
        .map_err(|e| match e {
            EmailClientError::MissingApiKey => {
                tracing::error!("Email provider API key is not configured");
                ContactError::MissingConfiguration
            }
            EmailClientError::Delivery(source) => ContactError::Delivery(source),
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Мессеж амжилттай илгээгдлээ" })))
}

/// Builds the notification email and hands it to the relay client. The
/// submitter's address goes into reply-to so the recipient can answer
/// directly.
#[tracing::instrument(name = "Send contact notification email", skip(email_client, message))]
async fn send_contact_email(
    email_client: &EmailClient,
    message: &ContactMessage,
) -> Result<(), EmailClientError> {
    let subject = format!("[Portfolio] {}", message.subject());
    let html_body = format!(
        "<h2>Портфолиогоос шинэ мессеж</h2>\
         <p><strong>Нэр:</strong> {name}</p>\
         <p><strong>Имэйл:</strong> {email}</p>\
         <p><strong>Гарчиг:</strong> {subject}</p>\
         <hr />\
         <p>{body}</p>",
        name = encode_minimal(message.name()),
        email = encode_minimal(message.email().as_ref()),
        subject = encode_minimal(message.subject()),
        // Escape first, then turn newlines into line breaks.
        body = encode_minimal(message.message()).replace('\n', "<br />"),
    );
    email_client
        .send_email(&subject, message.email(), &html_body)
        .await
}

/// Fallback for non-POST requests on the contact path; keeps the 405 body in
/// the same JSON shape as every other response.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({ "message": "Method not allowed" }))
}
