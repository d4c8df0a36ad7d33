//! Unified error types for loginstore.
//! Used by: config, store, password, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::handlers::MessageResponse;

pub const MISSING_CREDENTIALS: &str = "Email and Password required";
pub const MALFORMED_BODY: &str = "Malformed JSON body";
pub const UNSUPPORTED_MEDIA_TYPE: &str = "Expected request with `Content-Type: application/json`";
pub const PAYLOAD_TOO_LARGE: &str = "Request body too large";
pub const STORE_UNAVAILABLE: &str = "Storage unavailable";
pub const STORE_FAILED: &str = "Failed to store login data";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("email and password required")]
    MissingCredentials,

    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("request body exceeds the size limit")]
    PayloadTooLarge,

    #[error("no usable storage handle")]
    StoreUnavailable,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("storage lock poisoned: {0}")]
    Lock(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingCredentials | Error::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Error::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::Database(_)
            | Error::Mongo(_)
            | Error::Hashing(_)
            | Error::Lock(_)
            | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Backend details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::MissingCredentials => MISSING_CREDENTIALS,
            Error::MalformedBody(_) => MALFORMED_BODY,
            Error::UnsupportedMediaType(_) => UNSUPPORTED_MEDIA_TYPE,
            Error::PayloadTooLarge => PAYLOAD_TOO_LARGE,
            Error::StoreUnavailable => STORE_UNAVAILABLE,
            _ => STORE_FAILED,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = MessageResponse { message: self.public_message().into() };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_returns_400() {
        let response = Error::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_body_returns_400() {
        let response = Error::MalformedBody("eof".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_media_type_returns_415() {
        let response = Error::UnsupportedMediaType("text/plain".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn payload_too_large_returns_413() {
        let response = Error::PayloadTooLarge.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(Error::PayloadTooLarge.public_message(), "Request body too large");
    }

    #[test]
    fn store_unavailable_returns_503() {
        let response = Error::StoreUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn backend_errors_return_500() {
        let response = Error::Hashing("salt".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = Error::Lock("poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn backend_details_are_not_public() {
        let err = Error::Lock("mutex poisoned at store.rs".into());
        assert_eq!(err.public_message(), STORE_FAILED);
        assert!(err.to_string().contains("mutex poisoned"));
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(Error::StoreUnavailable.to_string(), "no usable storage handle");
        assert_eq!(
            Error::Config("PASSWORD_POLICY=rot13".into()).to_string(),
            "invalid configuration: PASSWORD_POLICY=rot13"
        );
    }
}
