//! Application configuration management with security considerations.
//!
//! All values are read from environment variables once at process start and
//! injected into the web handlers through the application state; handlers
//! never reach for ambient configuration.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Production environments should use secure secret management systems

use envconfig::Envconfig;

/// Application configuration with security-aware field management.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Never log or expose sensitive values
/// - Rotate sensitive credentials regularly
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost"
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    /// Common values: 80 (HTTP), 443 (HTTPS), 8080 (dev)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions, store path securely
    /// Example: "/etc/ssl/private/server.key"
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    /// Example: "/etc/ssl/certs/server.crt"
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// Graph API version used for outbound sends (NON-SENSITIVE)
    #[envconfig(default = "v22.0")]
    pub graph_api_version: String,

    /// 🔒 SENSITIVE: Token expected on the webhook verification handshake
    /// Must match the verify token configured in the Meta app dashboard
    pub whatsapp_verify_token: String,

    /// 🔒 SENSITIVE: WhatsApp Business access token for outbound sends
    /// Security: Store in secure secret management system
    pub whatsapp_access_token: String,

    /// 🔒 SENSITIVE: Meta app secret for webhook signature verification
    /// Optional; when unset, X-Hub-Signature-256 checks are skipped
    pub whatsapp_app_secret: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}
