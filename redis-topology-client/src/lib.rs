//! # redis-topology-client
//!
//! Builds [`fred`] clients from `redis-topology-url` connection strings.
//!
//! The parser crate decides *what* to connect to; this crate maps that
//! decision onto a `fred` [`Config`](fred::prelude::Config) and builder.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redis_topology_client::connect;
//! use redis_topology_url::{CredentialsOverride, RedisUrl};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = RedisUrl::new(
//!         Some("redis-cluster://node1:7000,node2:7001?maxRedirections=8"),
//!         CredentialsOverride::new().password("secret"),
//!     )?;
//!
//!     let client = connect(&url).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Option Mapping
//!
//! | Option | fred setting |
//! |---|---|
//! | `db` | `Config::database` (values above 255 are rejected) |
//! | `enableOfflineQueue=false` | `Config::fail_fast` |
//! | `connectTimeout` | `ConnectionConfig::connection_timeout` |
//! | `maxRetriesPerRequest` | `ConnectionConfig::max_command_attempts` (plus one) |
//! | `noDelay` | `TcpConfig::nodelay` |
//! | `maxRedirections` (cluster) | `ConnectionConfig::max_redirections` |
//! | retry strategy | `ReconnectPolicy::new_constant(0, 1000)` |
//!
//! Options without a `fred` counterpart (`enableAutoPipelining`, `keyPrefix`,
//! `scaleReads` and others) stay available on the parsed records.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod connection;
mod error;

pub use connection::{FredFactory, FredSettings, connect};
pub use error::{ClientError, ClientResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::connection::{FredFactory, connect};
    pub use crate::error::{ClientError, ClientResult};
    pub use fred::prelude::{Client, ClientLike};
}
