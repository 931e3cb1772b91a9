//! CLI error types and result alias.

use miette::Diagnostic;
use redis_topology_client::ClientError;
use redis_topology_url::UrlError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Malformed connection string
    #[error("Invalid connection string: {0}")]
    #[diagnostic(
        code(redis_topology::url),
        help("expected scheme://host[:port][,host[:port]...][?key=value&...]")
    )]
    Url(#[source] UrlError),

    /// Scheme is not one of the six supported ones
    #[error("{0}")]
    #[diagnostic(
        code(redis_topology::protocol),
        help("use redis, rediss, redis-sentinel, rediss-sentinel, redis-cluster or rediss-cluster")
    )]
    Protocol(#[source] UrlError),

    /// Client construction or connection failure
    #[error("Connection error: {0}")]
    #[diagnostic(code(redis_topology::connection))]
    Connection(#[source] ClientError),

    /// No connection within `connectTimeout`
    #[error("Timed out after {0} ms waiting for a connection")]
    #[diagnostic(
        code(redis_topology::timeout),
        help("check that the server is reachable, or raise connectTimeout in the query")
    )]
    Timeout(u128),

    /// Output serialization failure
    #[error("Output error: {0}")]
    #[diagnostic(code(redis_topology::output))]
    Output(#[from] serde_json::Error),
}

impl From<UrlError> for CliError {
    fn from(err: UrlError) -> Self {
        if err.is_unsupported_protocol() {
            CliError::Protocol(err)
        } else {
            CliError::Url(err)
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Url(url) => url.into(),
            other => CliError::Connection(other),
        }
    }
}
