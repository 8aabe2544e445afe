use anyhow::Context;
use log::{error, info};
use reqwest::Client;
use serde::Serialize;

use crate::{ContactEmailSender, ContactError, ContactMessage, ContactResult, StdResult};

/// The EmailJS production endpoint for sending emails.
pub const EMAILJS_SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// The identifiers of the EmailJS service, template and account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailJsConfig {
    /// Builds the configuration when every identifier is present and non-empty.
    pub fn from_parts(
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Option<Self> {
        let filled = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Some(Self {
            service_id: filled(service_id)?,
            template_id: filled(template_id)?,
            public_key: filled(public_key)?,
        })
    }
}

#[derive(Serialize, Debug)]
struct SendEmailPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize, Debug)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    reply_to: &'a str,
}

/// Sends contact notifications through the EmailJS REST API.
pub struct EmailJsSender {
    client: Client,
    endpoint: String,
    config: Option<EmailJsConfig>,
}

impl EmailJsSender {
    /// Creates a new `EmailJsSender` instance.
    ///
    /// A missing configuration is only reported when a message is sent.
    pub fn try_new(endpoint: &str, config: Option<EmailJsConfig>) -> StdResult<Self> {
        let client = Client::builder()
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            config,
        })
    }
}

#[async_trait::async_trait]
impl ContactEmailSender for EmailJsSender {
    async fn send(&self, message: &ContactMessage) -> ContactResult<()> {
        let Some(config) = &self.config else {
            error!("EmailJS configuration is missing");
            return Err(ContactError::NotConfigured("Email service".to_string()));
        };
        let payload = SendEmailPayload {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: TemplateParams {
                name: &message.name,
                email: &message.email,
                message: &message.message,
                reply_to: &message.email,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ContactError::Delivery(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("EmailJS sending error: {status} {body}");
            return Err(ContactError::Delivery(format!("{status}: {body}")));
        }
        info!("Sent notification for {message}");

        Ok(())
    }
}
