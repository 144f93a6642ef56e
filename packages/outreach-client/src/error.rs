//! Error types for the Outreach client.

use thiserror::Error;

/// Result type for Outreach client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Outreach client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (bad base URL, client builder failure)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, reset, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the credentials or bearer token (HTTP 401)
    #[error("Unauthorized: {}", detail.as_deref().unwrap_or("credentials rejected"))]
    Unauthorized { detail: Option<String> },

    /// Any other non-2xx response
    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// A 2xx body that does not match the documented shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Build the error for a non-2xx response from its status and raw body.
    ///
    /// The backend reports failures as `{ "detail": "..." }`; only a string
    /// `detail` is used; validation errors carry a list there and are dropped.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = crate::decode::error_detail(body);
        if status == 401 {
            ClientError::Unauthorized { detail }
        } else {
            ClientError::Api { status, detail }
        }
    }

    /// The server-provided message, if there was one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { detail } | ClientError::Api { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// True when the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
