//! Error responses for the webhook surface.
//!
//! The WhatsApp platform only looks at status codes, so every error renders
//! as a plain-text reason phrase rather than a structured body.

use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

#[derive(Debug, Display, Error)]
pub enum WebhookError {
    BadRequest,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl WebhookError {
    fn reason(&self) -> &'static str {
        match self {
            WebhookError::BadRequest => "Bad Request",
            WebhookError::Forbidden => "Forbidden",
            WebhookError::NotFound => "Not Found",
            WebhookError::InternalServerError => "Internal Server Error",
        }
    }
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        web::HttpResponse::build(self.status_code())
            .content_type("text/plain")
            .body(self.reason())
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::BadRequest => http::StatusCode::BAD_REQUEST,
            WebhookError::Forbidden => http::StatusCode::FORBIDDEN,
            WebhookError::NotFound => http::StatusCode::NOT_FOUND,
            WebhookError::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fallback handler for anything outside the GET/POST webhook contract
pub async fn method_not_allowed() -> web::HttpResponse {
    web::HttpResponse::MethodNotAllowed()
        .content_type("text/plain")
        .body("Method Not Allowed")
}
