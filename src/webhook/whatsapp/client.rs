//! # WhatsApp API Client
//!
//! Client for sending messages to WhatsApp Business API. Authentication uses
//! the `access_token` query parameter of the Graph send endpoint.

use super::{
    WhatsAppApi,
    outgoing_schemas::{OutgoingTextMessage, WhatsAppMessageResponse},
};
use crate::{config, consts};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// WhatsApp API client for sending messages
pub struct WhatsAppClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Graph API version segment of the send endpoint
    graph_api_version: String,
    /// Authentication token
    access_token: String,
}

impl WhatsAppClient {
    /// Creates a new WhatsApp client from the application configuration
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            graph_api_version: app_config.graph_api_version.clone(),
            access_token: app_config.whatsapp_access_token.clone(),
        }
    }

    /// Constructs the send-message endpoint for a business phone number.
    ///
    /// The phone number id comes from the notification being answered, not
    /// from configuration: replies go out through whichever number the
    /// message arrived on.
    fn send_msg_endpoint(&self, phone_number_id: &str) -> String {
        format!(
            "{base}/{version}/{id}/messages",
            base = consts::GRAPH_API_BASE_URL,
            version = self.graph_api_version,
            id = phone_number_id,
        )
    }
}

#[async_trait]
impl WhatsAppApi for WhatsAppClient {
    async fn send_text_message(&self, phone_number_id: &str, to: &str, body: &str) -> Result<()> {
        let message = OutgoingTextMessage::new(to.to_string(), body.to_string());

        let response = self
            .client
            .post(self.send_msg_endpoint(phone_number_id))
            .query(&[("access_token", self.access_token.as_str())])
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
            .context("Failed to send request to WhatsApp API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("WhatsApp API returned error status {}: {}", status, body);
        }

        let whatsapp_response: WhatsAppMessageResponse = response
            .json()
            .await
            .context("Failed to parse WhatsApp API response")?;

        if let Some(sent) = whatsapp_response.messages.first() {
            log::info!("reply delivered, message id {}", sent.id);
        }

        Ok(())
    }
}
