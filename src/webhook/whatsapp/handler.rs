//! # WhatsApp Webhook Handler
//!
//! Business logic for incoming webhook notifications: locating the first
//! text message in the payload and replying to its sender.

use super::{ImplWhatsAppApi, schemas::WebhookPayload};
use crate::consts;
use anyhow::Result;

/// The three scalars needed to reply to a notification, borrowed from the
/// payload they were extracted from.
#[derive(Debug, PartialEq)]
pub struct InboundTextMessage<'a> {
    /// Business phone number the notification was delivered for
    pub phone_number_id: &'a str,
    /// Sender's WhatsApp ID
    pub from: &'a str,
    /// Text body of the message
    pub body: &'a str,
}

/// Resolves the first text message of a webhook payload.
///
/// Only the first element of each sequence is ever inspected: the first
/// entry, its first change, the first message of that change. Returns `None`
/// if any link of the chain is absent, including the extracted scalars
/// themselves.
pub fn first_text_message(payload: &WebhookPayload) -> Option<InboundTextMessage<'_>> {
    let value = payload.entry.first()?.changes.first()?.value.as_ref()?;
    let message = value.messages.as_ref()?.first()?;

    Some(InboundTextMessage {
        phone_number_id: value.metadata.as_ref()?.phone_number_id.as_deref()?,
        from: message.from.as_deref()?,
        body: message.text.as_ref()?.body.as_deref()?,
    })
}

/// Composes the canned reply for an incoming message body
pub fn reply_body(msg_body: &str) -> String {
    format!("{}{}", consts::REPLY_PREFIX, msg_body)
}

/// Sends the canned reply for `message` back to its sender.
///
/// Exactly one outbound call per invocation; there is no deduplication, so
/// redelivered notifications produce a second reply.
pub async fn reply_to_message(
    message: &InboundTextMessage<'_>,
    client: &ImplWhatsAppApi,
) -> Result<()> {
    client
        .send_text_message(
            message.phone_number_id,
            message.from,
            &reply_body(message.body),
        )
        .await
}
