//! Error types for client construction.

use redis_topology_url::UrlError;
use thiserror::Error;

/// Result type for client construction.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while building or connecting a client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The connection string was malformed or its scheme is unsupported.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// A sentinel connection was requested without a `name` parameter.
    #[error("Sentinel connections require the name of the master (`name` parameter)")]
    MissingMasterName,

    /// The database index does not fit the client library's range (0-255).
    #[error("Database index {0} is out of range (0-255)")]
    InvalidDatabase(u32),

    /// The client library rejected the configuration or failed to connect.
    #[error("Client error: {0}")]
    Library(#[from] fred::error::Error),
}

impl ClientError {
    /// Check if the error came from the client library rather than from parsing.
    #[must_use]
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::MissingMasterName | Self::InvalidDatabase(_) | Self::Library(_))
    }

    /// Check if the scheme was not recognised.
    #[must_use]
    pub fn is_unsupported_protocol(&self) -> bool {
        matches!(self, Self::Url(err) if err.is_unsupported_protocol())
    }
}
