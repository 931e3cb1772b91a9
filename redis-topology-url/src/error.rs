//! Error types for connection-string handling.

use thiserror::Error;

/// Result type for connection-string operations.
pub type UrlResult<T> = Result<T, UrlError>;

/// Errors that can occur while parsing a connection string or planning a client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input does not match `scheme://authority[...]`.
    #[error("Invalid connection URL: {0}")]
    Format(String),

    /// A server token has a malformed host or port segment.
    #[error("Invalid server '{token}' in connection URL: {message}")]
    InvalidServer {
        /// The offending comma-separated token.
        token: String,
        /// What is wrong with it.
        message: String,
    },

    /// The scheme does not map to any supported topology.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),
}

impl UrlError {
    /// Create a format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create an invalid server error.
    pub fn invalid_server(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidServer {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported protocol error.
    pub fn unsupported(scheme: impl Into<String>) -> Self {
        Self::UnsupportedProtocol(scheme.into())
    }

    /// Check if the input string was malformed.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_) | Self::InvalidServer { .. })
    }

    /// Check if the scheme was not recognised.
    #[must_use]
    pub fn is_unsupported_protocol(&self) -> bool {
        matches!(self, Self::UnsupportedProtocol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(UrlError::format("missing scheme").is_format_error());
        assert!(UrlError::invalid_server("host:abc", "port is not a number").is_format_error());
        assert!(!UrlError::unsupported("http:").is_format_error());
        assert!(UrlError::unsupported("http:").is_unsupported_protocol());
    }

    #[test]
    fn test_error_display() {
        let err = UrlError::invalid_server("host:abc", "port is not a number");
        assert_eq!(
            err.to_string(),
            "Invalid server 'host:abc' in connection URL: port is not a number"
        );
        assert_eq!(
            UrlError::unsupported("http:").to_string(),
            "Unsupported protocol: http:"
        );
    }
}
