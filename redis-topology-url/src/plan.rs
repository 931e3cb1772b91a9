//! Typed client construction plans.

use crate::error::UrlError;
use crate::options::{ClusterOptions, RedisOptions};
use crate::parser::Endpoint;
use crate::topology::Topology;

/// Everything a client library needs to construct a connection.
///
/// One variant per supported topology; unsupported schemes never produce a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPlan {
    /// Connect to one server.
    Single {
        /// The first endpoint of the connection string.
        endpoint: Endpoint,
        /// Common options.
        options: RedisOptions,
        /// Username.
        username: Option<String>,
        /// Password.
        password: Option<String>,
        /// Whether the scheme asked for a secured transport.
        secured: bool,
    },
    /// Discover the primary through sentinel processes.
    Sentinel {
        /// Sentinel seed list.
        sentinels: Vec<Endpoint>,
        /// Common options.
        options: RedisOptions,
        /// Name of the monitored primary (`name` parameter).
        master_name: Option<String>,
        /// Authenticates the primary/replica data connection.
        password: Option<String>,
        /// Authenticates the sentinel processes.
        sentinel_password: Option<String>,
        /// Whether the scheme asked for a secured transport.
        secured: bool,
    },
    /// Connect to a sharded cluster.
    Cluster {
        /// Cluster seed nodes.
        nodes: Vec<Endpoint>,
        /// Cluster options with node credentials injected.
        options: ClusterOptions,
        /// Whether the scheme asked for a secured transport.
        secured: bool,
    },
}

impl ClientPlan {
    /// Get the topology this plan targets.
    pub fn topology(&self) -> Topology {
        match self {
            Self::Single { .. } => Topology::Single,
            Self::Sentinel { .. } => Topology::Sentinel,
            Self::Cluster { .. } => Topology::Cluster,
        }
    }

    /// Get the endpoints the client will contact first.
    pub fn endpoints(&self) -> &[Endpoint] {
        match self {
            Self::Single { endpoint, .. } => std::slice::from_ref(endpoint),
            Self::Sentinel { sentinels, .. } => sentinels,
            Self::Cluster { nodes, .. } => nodes,
        }
    }

    /// Check if the scheme asked for a secured transport.
    pub fn secured(&self) -> bool {
        match self {
            Self::Single { secured, .. }
            | Self::Sentinel { secured, .. }
            | Self::Cluster { secured, .. } => *secured,
        }
    }

    /// Get the common options that apply to each connection.
    pub fn redis_options(&self) -> &RedisOptions {
        match self {
            Self::Single { options, .. } | Self::Sentinel { options, .. } => options,
            Self::Cluster { options, .. } => &options.redis_options.options,
        }
    }
}

/// Constructs client handles from plans.
///
/// Implementations wrap a concrete client library. The returned handle is
/// owned by the caller.
pub trait ClientFactory {
    /// The client handle type.
    type Client;
    /// The error type; must absorb planning errors.
    type Error: From<UrlError>;

    /// Construct a client for the plan.
    fn build(&self, plan: ClientPlan) -> Result<Self::Client, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NodeOptions;

    #[test]
    fn test_plan_accessors() {
        let plan = ClientPlan::Single {
            endpoint: Endpoint::new("localhost", 6379),
            options: RedisOptions::default(),
            username: None,
            password: None,
            secured: true,
        };
        assert_eq!(plan.topology(), Topology::Single);
        assert_eq!(plan.endpoints(), &[Endpoint::new("localhost", 6379)]);
        assert!(plan.secured());

        let mut options = ClusterOptions::default();
        options.redis_options = NodeOptions::new(RedisOptions {
            db: 2,
            ..RedisOptions::default()
        });
        let plan = ClientPlan::Cluster {
            nodes: vec![Endpoint::new("a", 7000), Endpoint::new("b", 7001)],
            options,
            secured: false,
        };
        assert_eq!(plan.topology(), Topology::Cluster);
        assert_eq!(plan.endpoints().len(), 2);
        assert_eq!(plan.redis_options().db, 2);
        assert!(!plan.secured());
    }
}
