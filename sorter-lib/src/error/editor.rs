//! Editor error types

use super::ConfigError;
use super::GatewayError;

/// Message shown when an error carries no usable text.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Processing failed.";

/// Errors surfaced by the list editor's load and save operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A required configuration input is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A load or save is already in flight.
    #[error("another load or save is already in progress")]
    Busy,

    /// A fetched record carried no identity, so its order could not be saved.
    #[error("record at position {position} has no Id")]
    MissingRecordId {
        /// 1-based position of the record in the fetched list.
        position: usize,
    },
}

impl EditorError {
    /// Returns the structured payload message, if any.
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            Self::Gateway(e) => e.payload_message(),
            _ => None,
        }
    }

    /// Returns the message to present to the user.
    ///
    /// Prefers the remote payload message, then the error's own message,
    /// then [`DEFAULT_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        if let Some(message) = self.payload_message().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message_wins() {
        let err = EditorError::from(GatewayError::rejected("field-level security"));
        assert_eq!(err.user_message(), "field-level security");
    }

    #[test]
    fn test_falls_back_to_error_message() {
        let err = EditorError::from(GatewayError::http(500, None, ""));
        assert_eq!(err.user_message(), "remote call rejected (HTTP 500)");

        let err = EditorError::from(ConfigError::MissingOrderField);
        assert_eq!(err.user_message(), "order_field_name is not specified");
    }

    #[test]
    fn test_blank_payload_is_skipped() {
        let err = EditorError::from(GatewayError::rejected("  "));
        assert_eq!(err.user_message(), "remote call rejected");
    }

    #[test]
    fn test_falls_back_to_default_message() {
        let err = EditorError::from(GatewayError::Failed(String::new()));
        assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    }
}
