pub const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

pub const HANDSHAKE_SUBSCRIBE_MODE: &str = "subscribe";
pub const REPLY_PREFIX: &str = "Hi.. I'm Prasath, your message is ";
