//! src/domain/outbound_notification.rs
use crate::domain::ContactSubmission;

const NO_MESSAGE_PLACEHOLDER: &str = "(No message provided)";

/// The fully constructed message handed to the delivery provider: reply-to,
/// subject and an HTML body with every submitter-controlled value escaped.
///
/// Only constructible from a [`ContactSubmission`], so a delivery can never
/// be attempted for a submission that failed validation.
pub struct OutboundNotification {
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}

impl From<&ContactSubmission> for OutboundNotification {
    fn from(submission: &ContactSubmission) -> Self {
        let message = if submission.message.is_empty() {
            NO_MESSAGE_PLACEHOLDER
        } else {
            submission.message.as_ref()
        };
        // Escape first, then rewrite newlines: `<br>` must survive escaping.
        let html_body = format!(
            "<p><strong>From:</strong> {} &lt;{}&gt;</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            escape_html(submission.name.as_ref()),
            escape_html(submission.email.as_ref()),
            escape_html(message).replace('\n', "<br>"),
        );
        Self {
            reply_to: submission.email.as_ref().to_owned(),
            subject: format!("Contact form: {}", submission.name.as_ref()),
            html_body,
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
