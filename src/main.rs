//! # WhatsApp Reply Bot
//!
//! A stateless webhook service for the WhatsApp Business API.
//! It verifies the Meta subscription handshake, receives message
//! notifications and replies to the sender through the Graph API.

pub mod config;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod webhook;

use anyhow::Context;
use envconfig::Envconfig;
use ntex::web;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    let app_config = config::AppConfig::init_from_env()
        .context("Failed to load application configuration. Check environment variables.")?;

    configure_and_run_server(app_config).await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the loaded configuration
fn create_app_state(app_config: config::AppConfig) -> webhook::AppState {
    webhook::AppState {
        whatsapp_client: Box::new(webhook::whatsapp::client::WhatsAppClient::new(&app_config)),
        config: app_config,
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(app_config: config::AppConfig) -> anyhow::Result<()> {
    let server_addr = (
        app_config.web_server_host.clone(),
        app_config.web_server_port,
    );
    let ssl_acceptor = if app_config.is_prod() {
        Some(setup_ssl_acceptor(&app_config)?)
    } else {
        None
    };

    let server = web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(app_config.clone()))
            .configure(webhook::routes::whatsapp)
            .default_service(web::route().to(errors::method_not_allowed))
    });

    let bound_server = match ssl_acceptor {
        Some(ssl_acceptor) => server.bind_openssl(server_addr, ssl_acceptor)?,
        None => server.bind(server_addr)?,
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
