use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Inline message shown when a failure carries no backend `detail`.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Client-level error type.
/// Every failure is scoped to the component that triggered it and is retryable.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Shared(Arc<ClientError>),
}

/// Error payload shape returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

impl ClientError {
    /// Builds an `Api` error from a non-2xx response body, keeping the structured
    /// `detail` when the body carries one.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .map(|d| match d {
                Value::String(s) => s,
                other => other.to_string(),
            });
        ClientError::Api { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Shared(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => detail.as_deref(),
            ClientError::Shared(inner) => inner.detail(),
            _ => None,
        }
    }

    /// The single inline message a form renders for this failure.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Shared(inner) => inner.message_or(fallback),
            _ => self
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        self.message_or(GENERIC_FAILURE)
    }
}

impl From<Arc<ClientError>> for ClientError {
    fn from(shared: Arc<ClientError>) -> Self {
        ClientError::Shared(shared)
    }
}
