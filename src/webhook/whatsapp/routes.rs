//! WhatsApp webhook endpoint handlers
//!
//! This module handles incoming webhook requests from WhatsApp Business API:
//! the verification handshake (GET) and the notification receiver (POST).
//!
//! # Security
//!
//! When `WHATSAPP_APP_SECRET` is configured, POST payloads must carry a valid
//! `X-Hub-Signature-256` header; without the secret the check is skipped and
//! the endpoint relies on the platform contract alone.

use super::{handler, schemas, security};
use crate::{consts, errors::WebhookError, webhook::AppState};
use ntex::{util::Bytes, web};
use serde::Deserialize;

/// Query parameters for webhook verification.
///
/// All three are optional at the wire level so the handler owns the
/// missing-parameter policy instead of the query extractor.
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token configured in the Meta dashboard
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Webhook verification endpoint (GET)
///
/// WhatsApp sends a GET request to verify the webhook URL before it starts
/// delivering notifications.
///
/// # Returns
/// - 200 with the challenge echoed verbatim if verification succeeds
/// - 403 if the mode or token does not match
/// - 400 if `hub.mode` or `hub.verify_token` is missing
#[web::get("")]
pub async fn verify(
    query: web::types::Query<VerifyQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (Some(mode), Some(verify_token)) = (&query.mode, &query.verify_token) else {
        return Err(WebhookError::BadRequest.into());
    };

    if mode != consts::HANDSHAKE_SUBSCRIBE_MODE
        || *verify_token != app_state.config.whatsapp_verify_token
    {
        return Err(WebhookError::Forbidden.into());
    }

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(query.challenge.clone().unwrap_or_default()))
}

/// Webhook receiver endpoint (POST)
///
/// Receives notification payloads from WhatsApp Business API and answers the
/// first text message with the canned reply. Exactly one outbound send per
/// accepted notification, awaited before the response is produced.
///
/// # Returns
/// - 200 "OK" once the reply was dispatched
/// - 400 if the top-level `object` marker is absent
/// - 403 if signature verification is configured and fails
/// - 404 if the expected message path does not resolve
/// - 500 on an unparseable body or a failed outbound send
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    if let Some(app_secret) = &app_state.config.whatsapp_app_secret {
        let signature = req
            .headers()
            .get(consts::SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok());

        let Some(signature) = signature else {
            log::warn!("Missing {} header on webhook delivery", consts::SIGNATURE_HEADER);
            return Err(WebhookError::Forbidden.into());
        };

        if !security::verify_signature(signature, &body, app_secret) {
            return Err(WebhookError::Forbidden.into());
        }
    }

    // Parse and send share one coarse failure boundary: both surface as 500
    let payload: schemas::WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Failed to parse webhook payload: {e}");
            return Err(WebhookError::InternalServerError.into());
        }
    };

    if payload.object.is_none() {
        return Err(WebhookError::BadRequest.into());
    }

    let Some(message) = handler::first_text_message(&payload) else {
        return Err(WebhookError::NotFound.into());
    };

    if let Err(e) = handler::reply_to_message(&message, &app_state.whatsapp_client).await {
        log::error!("Failed to reply to {}: {e:#}", message.from);
        return Err(WebhookError::InternalServerError.into());
    }

    Ok(web::HttpResponse::Ok().content_type("text/plain").body("OK"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config, errors,
        webhook::{AppState, whatsapp::MockWhatsAppApi},
    };
    use hmac::{Hmac, Mac};
    use ntex::http::StatusCode;
    use ntex::web::test;
    use sha2::Sha256;

    const NOTIFICATION: &str = r#"{"object":"whatsapp_business_account","entry":[{"changes":[{"value":{"metadata":{"phone_number_id":"123"},"messages":[{"from":"919999999999","text":{"body":"hello"}}]}}]}]}"#;

    fn test_state(mock_client: MockWhatsAppApi, app_secret: Option<&str>) -> AppState {
        AppState {
            config: config::AppConfig {
                env: "local".to_string(),
                web_server_host: "0.0.0.0".to_string(),
                web_server_port: 8080,
                private_key_path: "server.key".to_string(),
                certificate_path: "server.crt".to_string(),
                graph_api_version: "v22.0".to_string(),
                whatsapp_verify_token: "verify-secret".to_string(),
                whatsapp_access_token: "access-token".to_string(),
                whatsapp_app_secret: app_secret.map(str::to_string),
            },
            whatsapp_client: Box::new(mock_client),
        }
    }

    fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                web::App::new()
                    .state($state)
                    .configure(crate::webhook::routes::whatsapp)
                    .default_service(web::route().to(errors::method_not_allowed)),
            )
            .await
        };
    }

    #[ntex::test]
    async fn test_verify_echoes_challenge() {
        let app = test_app!(test_state(MockWhatsAppApi::new(), None));

        let req = test::TestRequest::get()
            .uri("/webhook/whatsapp?hub.mode=subscribe&hub.challenge=challenge123&hub.verify_token=verify-secret")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, Bytes::from("challenge123"));
    }

    #[ntex::test]
    async fn test_verify_wrong_token_is_forbidden() {
        let app = test_app!(test_state(MockWhatsAppApi::new(), None));

        let req = test::TestRequest::get()
            .uri("/webhook/whatsapp?hub.mode=subscribe&hub.challenge=abc&hub.verify_token=nope")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(test::read_body(resp).await, Bytes::from("Forbidden"));
    }

    #[ntex::test]
    async fn test_verify_wrong_mode_is_forbidden() {
        let app = test_app!(test_state(MockWhatsAppApi::new(), None));

        let req = test::TestRequest::get()
            .uri("/webhook/whatsapp?hub.mode=unsubscribe&hub.challenge=abc&hub.verify_token=verify-secret")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[ntex::test]
    async fn test_verify_missing_params_is_bad_request() {
        let app = test_app!(test_state(MockWhatsAppApi::new(), None));

        let req = test::TestRequest::get()
            .uri("/webhook/whatsapp?hub.challenge=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, Bytes::from("Bad Request"));
    }

    #[ntex::test]
    async fn test_receive_replies_to_sender() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client
            .expect_send_text_message()
            .withf(|phone_number_id, to, body| {
                phone_number_id == "123"
                    && to == "919999999999"
                    && body == "Hi.. I'm Prasath, your message is hello"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let app = test_app!(test_state(mock_client, None));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload(NOTIFICATION)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, Bytes::from("OK"));
    }

    #[ntex::test]
    async fn test_receive_no_dedup_across_deliveries() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client
            .expect_send_text_message()
            .times(2)
            .returning(|_, _, _| Ok(()));

        let app = test_app!(test_state(mock_client, None));

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/webhook/whatsapp")
                .set_payload(NOTIFICATION)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[ntex::test]
    async fn test_receive_invalid_json_is_internal_error() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client.expect_send_text_message().times(0);

        let app = test_app!(test_state(mock_client, None));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            test::read_body(resp).await,
            Bytes::from("Internal Server Error")
        );
    }

    #[ntex::test]
    async fn test_receive_send_failure_is_internal_error() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client
            .expect_send_text_message()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("WhatsApp API returned error status 401")));

        let app = test_app!(test_state(mock_client, None));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload(NOTIFICATION)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[ntex::test]
    async fn test_receive_unresolvable_path_is_not_found() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client.expect_send_text_message().times(0);

        let app = test_app!(test_state(mock_client, None));

        // object present, but no messages under the first change
        let body = r#"{"object":"whatsapp_business_account","entry":[{"changes":[{"value":{"metadata":{"phone_number_id":"123"}}}]}]}"#;
        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, Bytes::from("Not Found"));
    }

    #[ntex::test]
    async fn test_receive_missing_object_is_bad_request() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client.expect_send_text_message().times(0);

        let app = test_app!(test_state(mock_client, None));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload(r#"{"entry":[]}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_receive_with_valid_signature() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client
            .expect_send_text_message()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let app = test_app!(test_state(mock_client, Some("test-app-secret")));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .header(
                consts::SIGNATURE_HEADER,
                sign(NOTIFICATION.as_bytes(), "test-app-secret"),
            )
            .set_payload(NOTIFICATION)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[ntex::test]
    async fn test_receive_missing_signature_is_forbidden() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client.expect_send_text_message().times(0);

        let app = test_app!(test_state(mock_client, Some("test-app-secret")));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .set_payload(NOTIFICATION)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[ntex::test]
    async fn test_receive_bad_signature_is_forbidden() {
        let mut mock_client = MockWhatsAppApi::new();
        mock_client.expect_send_text_message().times(0);

        let app = test_app!(test_state(mock_client, Some("test-app-secret")));

        let req = test::TestRequest::post()
            .uri("/webhook/whatsapp")
            .header(
                consts::SIGNATURE_HEADER,
                sign(NOTIFICATION.as_bytes(), "some-other-secret"),
            )
            .set_payload(NOTIFICATION)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[ntex::test]
    async fn test_other_methods_not_allowed() {
        let app = test_app!(test_state(MockWhatsAppApi::new(), None));

        let req = test::TestRequest::with_uri("/webhook/whatsapp")
            .method(ntex::http::Method::PUT)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            test::read_body(resp).await,
            Bytes::from("Method Not Allowed")
        );
    }
}
