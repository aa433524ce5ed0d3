//! src/domain/contact_submission.rs

/// A validated contact-form submission. Request-scoped: built from one
/// inbound request and dropped once the response is sent.
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

#[derive(Debug)]
pub struct ContactName(String);

impl ContactName {
    /// Returns `Ok(ContactName)` if the input is non-empty once surrounding
    /// whitespace is trimmed, `Err(String)` otherwise.
    pub fn parse(name: String) -> Result<Self, String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Err("A contact name cannot be empty.".into())
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Trims and rejects empty input. The address is intentionally not
    /// checked for well-formedness: it is only used as a reply-to value and
    /// the delivery provider rejects addresses it cannot route.
    pub fn parse(email: String) -> Result<Self, String> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            Err("A contact email cannot be empty.".into())
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The free-text body of a submission. May be empty; rendering substitutes a
/// placeholder for empty messages.
#[derive(Debug)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn new(message: String) -> Self {
        Self(message.trim().to_owned())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
