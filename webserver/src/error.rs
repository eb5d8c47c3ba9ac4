//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use recommender::RecommenderError;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Recommender error: {0}")]
    Recommender(#[from] RecommenderError),
}

impl WebServerError {
    pub fn invalid(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest { details: details.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::ConfigError { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: WebServerError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_request_is_bad_request() {
        let (status, body) = render(WebServerError::invalid("cafeteria_menu is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid request: cafeteria_menu is required");
    }

    #[tokio::test]
    async fn test_recommender_failure_is_internal_error() {
        let err: WebServerError = RecommenderError::config("no HTTP client").into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("no HTTP client"));
    }

    #[test]
    fn test_server_startup_status() {
        let err = WebServerError::ServerStartup("port in use".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
