use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{ContactError, ContactResult};

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// The name of the sender.
    pub name: String,

    /// The email address of the sender, used as reply-to address.
    pub email: String,

    /// The message body.
    pub message: String,
}

impl ContactMessage {
    /// Creates a new `ContactMessage` instance.
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Checks that every field is filled and the email address looks like one.
    pub fn validate(&self) -> ContactResult<()> {
        if self.name.trim().is_empty() {
            return Err(ContactError::InvalidMessage("name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::InvalidMessage("email is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(ContactError::InvalidMessage(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::InvalidMessage(
                "message is required".to_string(),
            ));
        }

        Ok(())
    }
}

impl Display for ContactMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ContactMessage: name={}, email={}, length={}",
            self.name,
            self.email,
            self.message.len()
        )
    }
}

/// The outcome of a contact form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Whether the message was stored.
    pub stored: bool,

    /// Whether the notification email was sent.
    pub emailed: bool,
}
