//! # redis-topology
//!
//! Turns a Redis connection string into a client for the right deployment
//! shape: one server, a sentinel-managed primary, or a sharded cluster.
//!
//! - [`url`] parses the string, classifies the scheme and resolves options
//!   and credentials. It never touches the network.
//! - [`client`] (feature `client`, on by default) builds and connects a
//!   [`fred`](https://docs.rs/fred) client from the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redis_topology::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Falls back to $REDIS_URL, then redis://127.0.0.1
//!     let url = RedisUrl::new(None, CredentialsOverride::new())?;
//!     println!("connecting to a {} deployment", url.topology());
//!
//!     let client = connect(&url).await?;
//!     client.quit().await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection-string parsing, topology classification and option resolution.
pub mod url {
    pub use redis_topology_url::*;
}

/// `fred`-backed client construction.
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client {
    pub use redis_topology_client::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use redis_topology_url::prelude::*;

    #[cfg(feature = "client")]
    pub use redis_topology_client::prelude::*;
}

// Re-export key types at the crate root
pub use redis_topology_url::{ClientPlan, RedisUrl, Topology, UrlError};
