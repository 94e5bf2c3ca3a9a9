//! WhatsApp webhook integration module
//!
//! This module provides webhook handling for WhatsApp Business API
//! integration: the verification handshake, the notification receiver and
//! the outbound Graph API client used to reply.
//!
//! ## Submodules
//!
//! - [`handler`] - Extraction of the reply target from a notification payload
//! - [`routes`] - HTTP endpoint handlers for WhatsApp webhooks
//! - [`schemas`] - Incoming webhook payload structures
//! - [`outgoing_schemas`] - Outgoing message structures
//! - [`client`] - WhatsApp API client for sending messages
//! - [`security`] - X-Hub-Signature-256 payload verification

pub mod client;
pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

use async_trait::async_trait;

/// Outbound messaging seam, kept behind a trait so route handlers can be
/// exercised without talking to the Graph API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WhatsAppApi {
    /// Sends a text message through the business phone number identified by
    /// `phone_number_id`.
    async fn send_text_message(
        &self,
        phone_number_id: &str,
        to: &str,
        body: &str,
    ) -> anyhow::Result<()>;
}

pub type ImplWhatsAppApi = Box<dyn WhatsAppApi>;

// Re-export commonly used items for convenience
pub use routes::{receive, verify};
