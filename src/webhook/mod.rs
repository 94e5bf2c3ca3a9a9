//! Webhook handlers for external integrations
//!
//! This module contains the webhook endpoint handlers for the messaging
//! platforms the bot bridges. Today that is only WhatsApp Business.
//!
//! ## Modules
//!
//! - [`whatsapp`] - WhatsApp Business API webhook handlers

pub mod routes;
pub mod whatsapp;

use crate::config;

/// Per-worker application state injected into the route handlers.
///
/// Holds the immutable configuration and the outbound messaging client.
/// Nothing here is mutated after construction.
pub struct AppState {
    pub config: config::AppConfig,
    pub whatsapp_client: whatsapp::ImplWhatsAppApi,
}
