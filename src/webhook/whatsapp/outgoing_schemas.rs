//! # WhatsApp Outgoing Message Schemas
//!
//! Data structures for sending messages to WhatsApp Business API.

use serde::{Deserialize, Serialize};

/// Text message to send to WhatsApp
///
/// Wire shape: `{"messaging_product":"whatsapp","to":...,"text":{"body":...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient's WhatsApp ID (phone number)
    pub to: String,
    /// Text content
    pub text: OutgoingTextContent,
}

impl OutgoingTextMessage {
    /// Creates a new text message
    pub fn new(to: String, body: String) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            text: OutgoingTextContent { body },
        }
    }
}

/// Text content for outgoing messages
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextContent {
    /// Message body text
    pub body: String,
}

/// Response from WhatsApp API when sending a message.
///
/// Only the message ids are of interest and even those are informational;
/// the send is considered successful on any 2xx status.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WhatsAppMessageResponse {
    /// Array of messages sent
    #[serde(default)]
    pub messages: Vec<WhatsAppMessageStatus>,
}

/// Message status in response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppMessageStatus {
    /// Message ID
    pub id: String,
}
