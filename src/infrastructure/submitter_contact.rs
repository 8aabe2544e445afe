use std::sync::Arc;

use log::{info, warn};

use crate::{
    ContactEmailSender, ContactMessage, ContactMessagePersister, ContactResult, ContactSubmitter,
    SubmissionReceipt,
};

/// Stores contact messages when a storage is configured, then forwards them by email.
///
/// Storage is best effort: its failure is logged and the email is still sent. Email
/// failures are propagated to the caller.
pub struct ContactFormSubmitter {
    persister: Option<Arc<dyn ContactMessagePersister>>,
    sender: Arc<dyn ContactEmailSender>,
}

impl ContactFormSubmitter {
    /// Creates a new `ContactFormSubmitter` instance.
    pub fn new(
        persister: Option<Arc<dyn ContactMessagePersister>>,
        sender: Arc<dyn ContactEmailSender>,
    ) -> Self {
        Self { persister, sender }
    }

    async fn store(&self, message: &ContactMessage) -> bool {
        let Some(persister) = &self.persister else {
            warn!("Contact message storage is not configured, skipping");
            return false;
        };
        match persister.persist(message).await {
            Ok(id) => {
                info!("Stored contact message #{id}");
                true
            }
            Err(e) => {
                warn!("Database save failed, continuing with email: {e}");
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl ContactSubmitter for ContactFormSubmitter {
    async fn submit(&self, message: &ContactMessage) -> ContactResult<SubmissionReceipt> {
        message.validate()?;
        let stored = self.store(message).await;
        self.sender.send(message).await?;

        Ok(SubmissionReceipt {
            stored,
            emailed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::{ContactError, MockContactEmailSender, MockContactMessagePersister};

    use super::*;

    fn message() -> ContactMessage {
        ContactMessage::new("Ada", "ada@example.com", "Hello")
    }

    #[tokio::test]
    async fn submit_stores_then_sends() {
        let persister = {
            let mut persister = MockContactMessagePersister::new();
            persister
                .expect_persist()
                .with(eq(message()))
                .returning(|_| Ok(1))
                .times(1);

            persister
        };
        let sender = {
            let mut sender = MockContactEmailSender::new();
            sender
                .expect_send()
                .with(eq(message()))
                .returning(|_| Ok(()))
                .times(1);

            sender
        };
        let submitter = ContactFormSubmitter::new(Some(Arc::new(persister)), Arc::new(sender));

        let receipt = submitter.submit(&message()).await.unwrap();

        assert_eq!(
            SubmissionReceipt {
                stored: true,
                emailed: true
            },
            receipt
        );
    }

    #[tokio::test]
    async fn submit_sends_even_if_storage_fails() {
        let persister = {
            let mut persister = MockContactMessagePersister::new();
            persister
                .expect_persist()
                .returning(|_| Err(ContactError::Storage("connection lost".to_string())))
                .times(1);

            persister
        };
        let sender = {
            let mut sender = MockContactEmailSender::new();
            sender.expect_send().returning(|_| Ok(())).times(1);

            sender
        };
        let submitter = ContactFormSubmitter::new(Some(Arc::new(persister)), Arc::new(sender));

        let receipt = submitter.submit(&message()).await.unwrap();

        assert!(!receipt.stored);
        assert!(receipt.emailed);
    }

    #[tokio::test]
    async fn submit_without_storage_sends() {
        let sender = {
            let mut sender = MockContactEmailSender::new();
            sender.expect_send().returning(|_| Ok(())).times(1);

            sender
        };
        let submitter = ContactFormSubmitter::new(None, Arc::new(sender));

        let receipt = submitter.submit(&message()).await.unwrap();

        assert!(!receipt.stored);
    }

    #[tokio::test]
    async fn submit_propagates_email_failure() {
        let sender = {
            let mut sender = MockContactEmailSender::new();
            sender
                .expect_send()
                .returning(|_| Err(ContactError::NotConfigured("Email service".to_string())))
                .times(1);

            sender
        };
        let submitter = ContactFormSubmitter::new(None, Arc::new(sender));

        let error = submitter
            .submit(&message())
            .await
            .expect_err("Expected the email failure");

        assert_eq!(ContactError::NotConfigured("Email service".to_string()), error);
    }

    #[tokio::test]
    async fn submit_rejects_invalid_message_before_any_call() {
        let persister = MockContactMessagePersister::new();
        let sender = MockContactEmailSender::new();
        let submitter = ContactFormSubmitter::new(Some(Arc::new(persister)), Arc::new(sender));

        let error = submitter
            .submit(&ContactMessage::new("Ada", "not-an-email", "Hello"))
            .await
            .expect_err("Expected a validation failure");

        assert!(matches!(error, ContactError::InvalidMessage(_)));
    }
}
