//! src/routes/contact.rs
use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use anyhow::Context;
use futures_util::TryStreamExt;

use crate::domain::{
    ContactEmail, ContactMessage, ContactName, ContactSubmission, OutboundNotification,
};
use crate::email_client::EmailClient;
use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid content type")]
    UnsupportedContentType,
    #[error("Invalid form data")]
    MalformedPayload(#[source] anyhow::Error),
    #[error("Name and email are required")]
    MissingRequiredFields,
    #[error("Failed to send message. Please try again or email us directly.")]
    DeliveryFailed(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::UnsupportedContentType
            | ContactError::MalformedPayload(_)
            | ContactError::MissingRequiredFields => StatusCode::BAD_REQUEST,
            ContactError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Display carries the user-facing message for every variant; provider
        // detail lives in the source chain and stays in the logs.
        HttpResponse::build(self.status_code()).json(SubmissionRejected {
            ok: false,
            error: self.to_string(),
        })
    }
}

#[derive(serde::Serialize)]
struct SubmissionRejected {
    ok: bool,
    error: String,
}

#[derive(serde::Serialize)]
struct SubmissionAccepted {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

/// Raw field values of an inbound submission; absent fields are empty
/// strings, so validation has a single path.
struct ContactFormData {
    name: String,
    email: String,
    project: String,
}

impl ContactFormData {
    fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            name: fields.remove("name").unwrap_or_default(),
            email: fields.remove("email").unwrap_or_default(),
            project: fields.remove("project").unwrap_or_default(),
        }
    }
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = String;

    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        let name = ContactName::parse(form.name)?;
        let email = ContactEmail::parse(form.email)?;
        let message = ContactMessage::new(form.project);
        Ok(ContactSubmission {
            name,
            email,
            message,
        })
    }
}

enum FormPayloadKind {
    UrlEncoded,
    Multipart,
}

/// A submission must declare one of the two browser form encodings; anything
/// else is rejected before the body is read.
fn form_payload_kind(request: &HttpRequest) -> Option<FormPayloadKind> {
    let content_type = request.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    if content_type.starts_with("application/x-www-form-urlencoded") {
        Some(FormPayloadKind::UrlEncoded)
    } else if content_type.starts_with("multipart/form-data") {
        Some(FormPayloadKind::Multipart)
    } else {
        None
    }
}

#[tracing::instrument(
    name = "Handle a contact form submission",
    skip(request, payload, email_client),
    fields(
        contact_name = tracing::field::Empty,
        contact_email = tracing::field::Empty
    )
)]
pub async fn submit_contact(
    request: HttpRequest,
    payload: web::Payload,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, ContactError> {
    let kind = form_payload_kind(&request).ok_or(ContactError::UnsupportedContentType)?;
    let fields = match kind {
        FormPayloadKind::UrlEncoded => read_urlencoded_fields(payload).await,
        FormPayloadKind::Multipart => read_multipart_fields(&request, payload).await,
    }
    .map_err(ContactError::MalformedPayload)?;

    let submission: ContactSubmission = ContactFormData::from_fields(fields)
        .try_into()
        .map_err(|_| ContactError::MissingRequiredFields)?;
    tracing::Span::current().record(
        "contact_name",
        tracing::field::display(submission.name.as_ref()),
    );
    tracing::Span::current().record(
        "contact_email",
        tracing::field::display(submission.email.as_ref()),
    );

    let notification = OutboundNotification::from(&submission);
    let id = email_client
        .send_email(
            &notification.reply_to,
            &notification.subject,
            &notification.html_body,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to deliver the contact notification: {:?}", e);
            ContactError::DeliveryFailed(e)
        })?;

    Ok(HttpResponse::Ok().json(SubmissionAccepted { ok: true, id }))
}

async fn read_urlencoded_fields(
    payload: web::Payload,
) -> Result<HashMap<String, String>, anyhow::Error> {
    let body = payload
        .to_bytes()
        .await
        .context("Failed to read the request body.")?;
    let fields = serde_urlencoded::from_bytes(&body)
        .context("Failed to decode the body as url-encoded form data.")?;
    Ok(fields)
}

async fn read_multipart_fields(
    request: &HttpRequest,
    payload: web::Payload,
) -> Result<HashMap<String, String>, anyhow::Error> {
    let mut multipart = Multipart::new(request.headers(), payload);
    let mut fields = HashMap::new();
    while let Some(mut field) = multipart
        .try_next()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read the next multipart field: {}", e))?
    {
        let name = field.name().to_owned();
        let mut value = web::BytesMut::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read a multipart chunk: {}", e))?
        {
            value.extend_from_slice(&chunk);
        }
        let value =
            String::from_utf8(value.to_vec()).context("A form field held non-UTF-8 data.")?;
        fields.insert(name, value);
    }
    Ok(fields)
}
