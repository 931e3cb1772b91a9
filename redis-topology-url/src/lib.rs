//! # redis-topology-url
//!
//! Parses a Redis connection string into a typed description of the target
//! deployment: a single server, a sentinel-managed primary, or a sharded cluster.
//!
//! ## Connection String Format
//!
//! ```text
//! scheme://host1[:port1][,host2[:port2]...][/ignored][?key1=val1&key2=val2...]
//! ```
//!
//! | Scheme | Topology | Secured |
//! |---|---|---|
//! | `redis` | single | no |
//! | `rediss` | single | yes |
//! | `redis-sentinel` | sentinel | no |
//! | `rediss-sentinel` | sentinel | yes |
//! | `redis-cluster` | cluster | no |
//! | `rediss-cluster` | cluster | yes |
//!
//! Ports default to 6379. Credentials never appear in the string; they come
//! from explicit overrides or the `REDIS_USERNAME`, `REDIS_PASSWORD` and
//! `REDIS_SENTINEL_PASSWORD` environment variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use redis_topology_url::{ClientPlan, CredentialsOverride, RedisUrl};
//!
//! let url = RedisUrl::new(
//!     Some("redis-sentinel://s1:26379,s2:26379?name=mymaster&db=2"),
//!     CredentialsOverride::new().password("secret").sentinel_password("s3cret"),
//! )
//! .unwrap();
//!
//! assert!(url.uses_sentinel());
//! assert_eq!(url.redis_options().db, 2);
//!
//! match url.client_plan().unwrap() {
//!     ClientPlan::Sentinel { sentinels, master_name, .. } => {
//!         assert_eq!(sentinels.len(), 2);
//!         assert_eq!(master_name.as_deref(), Some("mymaster"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Handing a plan to a concrete client library is the job of a
//! [`ClientFactory`] implementation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod credentials;
mod env;
mod error;
pub mod logging;
mod options;
mod parser;
mod plan;
mod topology;

pub use config::RedisUrl;
pub use credentials::{Credentials, CredentialsOverride, mask};
pub use env::{
    DEFAULT_URL, EnvSource, MapEnvSource, REDIS_PASSWORD, REDIS_SENTINEL_PASSWORD, REDIS_URL,
    REDIS_USERNAME, StdEnvSource,
};
pub use error::{UrlError, UrlResult};
pub use options::{
    ClusterOptions, Flag, NodeOptions, ReconnectOnError, RedisOptions, RetryStrategy, ScaleReads,
};
pub use parser::{ConnectionString, Endpoint, ParameterTable};
pub use plan::{ClientFactory, ClientPlan};
pub use topology::{DEFAULT_PORT, Protocol, Topology};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::RedisUrl;
    pub use crate::credentials::{Credentials, CredentialsOverride};
    pub use crate::error::{UrlError, UrlResult};
    pub use crate::options::{ClusterOptions, RedisOptions};
    pub use crate::parser::{ConnectionString, Endpoint};
    pub use crate::plan::{ClientFactory, ClientPlan};
    pub use crate::topology::{Protocol, Topology};
}
