use crate::{ContactMessage, ContactResult, SubmissionReceipt};

/// A trait for handling contact form submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContactSubmitter: Sync + Send {
    /// Stores and forwards a submitted message.
    async fn submit(&self, message: &ContactMessage) -> ContactResult<SubmissionReceipt>;
}
