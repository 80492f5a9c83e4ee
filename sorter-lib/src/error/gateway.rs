//! Remote gateway error types

use std::time::Duration;

/// Structured error information returned by the remote side.
///
/// Hosts typically answer a rejected call with a JSON body such as
/// `{"message": "..."}` or `[{"message": "...", "errorCode": "..."}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub message: String,
    /// Remote error code, if provided.
    pub code: Option<String>,
}

impl ErrorPayload {
    /// Creates a payload with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Creates a payload with a message and error code.
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Errors raised by a [`RemoteDataGateway`](crate::gateway::RemoteDataGateway).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The remote side rejected the call.
    #[error(
        "remote call rejected{}",
        .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
    )]
    Remote {
        /// HTTP status code, when the gateway speaks HTTP.
        status: Option<u16>,
        /// Structured error payload, if the response carried one.
        payload: Option<ErrorPayload>,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Network error during the call.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The call timed out.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid endpoint URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response could not be decoded.
    #[error("response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Any other failure, described by its message (which may be empty).
    #[error("{0}")]
    Failed(String),
}

impl GatewayError {
    /// Creates a rejection carrying a structured payload message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            payload: Some(ErrorPayload::new(message)),
            body: None,
        }
    }

    /// Creates an HTTP rejection with an optional structured payload.
    pub fn http(status: u16, payload: Option<ErrorPayload>, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Remote {
            status: Some(status),
            payload,
            body: (!body.is_empty()).then_some(body),
        }
    }

    /// Creates a parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the structured payload message, if the remote side sent one.
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            Self::Remote {
                payload: Some(payload),
                ..
            } => Some(payload.message.as_str()),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this is an HTTP rejection.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
