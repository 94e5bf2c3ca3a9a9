use crate::errors;
use ntex::web;

/// Configures webhook routes for external integrations.
///
/// These routes are public endpoints that don't require session
/// authentication; the handshake token and the optional payload signature
/// are the only access controls.
///
/// # Routes
/// - `GET /webhook/whatsapp` - WhatsApp webhook verification
/// - `POST /webhook/whatsapp` - WhatsApp webhook receiver
pub fn whatsapp(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/webhook/whatsapp")
            .service((super::whatsapp::verify, super::whatsapp::receive))
            .default_service(web::route().to(errors::method_not_allowed)),
    );
}
