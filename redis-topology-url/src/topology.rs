//! Scheme to topology classification.

use serde::Serialize;

/// Port used when a server token omits one.
pub const DEFAULT_PORT: u16 = 6379;

/// Deployment shape a connection string points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// A single server.
    Single,
    /// A primary discovered through sentinel processes.
    Sentinel,
    /// A sharded cluster.
    Cluster,
    /// The scheme is not a known Redis scheme.
    Unsupported,
}

impl Topology {
    /// Get the topology name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Sentinel => "sentinel",
            Self::Cluster => "cluster",
            Self::Unsupported => "unsupported",
        }
    }

    /// Check if a client can be built for this topology.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Topology plus transport security, derived from a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Protocol {
    /// The deployment shape.
    pub topology: Topology,
    /// Whether the scheme asks for a secured transport.
    pub secured: bool,
}

impl Protocol {
    /// Classify a scheme, including its trailing colon (`redis:`).
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_scheme(scheme: &str) -> Self {
        let (topology, secured) = match scheme {
            "redis:" => (Topology::Single, false),
            "rediss:" => (Topology::Single, true),
            "redis-sentinel:" => (Topology::Sentinel, false),
            "rediss-sentinel:" => (Topology::Sentinel, true),
            "redis-cluster:" => (Topology::Cluster, false),
            "rediss-cluster:" => (Topology::Cluster, true),
            _ => (Topology::Unsupported, false),
        };
        Self { topology, secured }
    }
}
