// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for wcag-auditor

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::color::ColorError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wcag-auditor
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed request input (400)
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// The AI assistant answered but the answer was unusable
    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::Multipart(err) => err.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ColorError> for Error {
    fn from(err: ColorError) -> Self {
        Error::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge(message),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Error::UnsupportedMediaType(message),
            _ => Error::BadRequest(message),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status == StatusCode::PAYLOAD_TOO_LARGE {
            json!({ "error": "File too large", "message": self.to_string() })
        } else if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            json!({ "error": "Internal Server Error", "message": self.to_string() })
        } else {
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: Error) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let (status, body) = body_of(Error::BadRequest("HTML content is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "HTML content is required" }));
    }

    #[tokio::test]
    async fn test_payload_too_large_body() {
        let (status, body) = body_of(Error::PayloadTooLarge("limit is 5 MiB".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "File too large");
        assert_eq!(body["message"], "limit is 5 MiB");
    }

    #[tokio::test]
    async fn test_internal_error_body() {
        let (status, body) = body_of(Error::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Internal error: boom");
    }

    #[tokio::test]
    async fn test_json_rejection_keeps_status() {
        let rejection = JsonRejection::from(axum::extract::rejection::MissingJsonContentType::default());
        let err = Error::from(rejection);
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (_, body) = body_of(err).await;
        assert!(body["error"].as_str().is_some_and(|m| m.contains("Content-Type")));
    }

    #[test]
    fn test_color_error_is_bad_request() {
        let err: Error = ColorError::Unrecognised("blurple".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
