use crate::{ContactMessage, ContactResult};

/// A trait for delivering contact messages by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContactEmailSender: Sync + Send {
    /// Sends the notification email for the message.
    async fn send(&self, message: &ContactMessage) -> ContactResult<()>;
}
