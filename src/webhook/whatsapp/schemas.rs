//! # WhatsApp Webhook Schemas
//!
//! Data structures for the notification payloads WhatsApp posts to the
//! webhook. The platform treats almost every level as optional, so every
//! nested field here is optional or defaulted: a body that is valid JSON
//! always deserializes, and missing levels are detected by the extraction
//! chain in [`super::handler`] rather than by a deserialization failure.

use serde::{Deserialize, Serialize};

/// Root webhook payload from WhatsApp
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, typically "whatsapp_business_account"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Array of entry objects containing the actual data
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Entry object containing changes and metadata
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Entry {
    /// Business Account ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Array of changes that occurred
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// Change object containing the actual webhook data
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Change {
    /// The field that changed (e.g., "messages")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The value containing the actual data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ChangeValue>,
}

/// Value object containing messages and metadata
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChangeValue {
    /// Messaging product (e.g., "whatsapp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_product: Option<String>,
    /// Metadata about the business phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Array of messages received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

/// Metadata about the WhatsApp Business phone number
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Metadata {
    /// Display name of the business phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_phone_number: Option<String>,
    /// Phone number ID, the sender identity for outbound replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_id: Option<String>,
}

/// Message object
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Message {
    /// Sender's WhatsApp ID (phone number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Message ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Timestamp of the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Message type (text, image, video, document, etc.)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,
    /// Text message content (if type is "text")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextMessage>,
}

/// Text message content
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TextMessage {
    /// The text body of the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
