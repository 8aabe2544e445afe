use crate::{ContactMessage, ContactResult};

/// A trait for persisting contact messages to a storage medium.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContactMessagePersister: Sync + Send {
    /// Persists the message and returns its identifier.
    async fn persist(&self, message: &ContactMessage) -> ContactResult<i64>;
}
