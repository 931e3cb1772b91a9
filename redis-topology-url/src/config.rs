//! The connection-string entry point.

use crate::credentials::{Credentials, CredentialsOverride};
use crate::env::{DEFAULT_URL, EnvSource, REDIS_URL, StdEnvSource};
use crate::error::{UrlError, UrlResult};
use crate::options::{ClusterOptions, RedisOptions};
use crate::parser::{ConnectionString, Endpoint, ParameterTable};
use crate::plan::{ClientFactory, ClientPlan};
use crate::topology::{Protocol, Topology};
use tracing::{debug, info};

/// A parsed connection string together with its resolved credentials.
///
/// Immutable once constructed. Option records are resolved afresh on every
/// call, so callers may modify what they get back without affecting `self`.
///
/// # Examples
///
/// ```rust
/// use redis_topology_url::{CredentialsOverride, MapEnvSource, RedisUrl, Topology};
///
/// let env = MapEnvSource::new().set("REDIS_PASSWORD", "from-env");
/// let url = RedisUrl::with_env(
///     Some("redis-cluster://node1:7000,node2:7001?scaleReads=all"),
///     CredentialsOverride::new(),
///     &env,
/// )
/// .unwrap();
///
/// assert!(url.clustered());
/// assert_eq!(url.topology(), Topology::Cluster);
/// assert_eq!(url.cluster_options().scale_reads, "all");
/// assert_eq!(url.credentials().password(), Some("from-env"));
/// ```
#[derive(Debug, Clone)]
pub struct RedisUrl {
    connection: ConnectionString,
    protocol: Protocol,
    credentials: Credentials,
}

impl RedisUrl {
    /// Create from an optional connection string and credential overrides,
    /// falling back to the process environment.
    ///
    /// Without a URL, `REDIS_URL` is used, then `redis://127.0.0.1`.
    pub fn new(url: Option<&str>, overrides: CredentialsOverride) -> UrlResult<Self> {
        Self::with_env(url, overrides, &StdEnvSource)
    }

    /// Create using an explicit environment source.
    pub fn with_env(
        url: Option<&str>,
        overrides: CredentialsOverride,
        env: &impl EnvSource,
    ) -> UrlResult<Self> {
        let raw = match url {
            Some(url) => url.to_string(),
            None => env.get(REDIS_URL).unwrap_or_else(|| {
                debug!("{REDIS_URL} not set, using {DEFAULT_URL}");
                DEFAULT_URL.to_string()
            }),
        };

        let connection = ConnectionString::parse(&raw)?;
        let protocol = Protocol::from_scheme(connection.scheme());
        let credentials = Credentials::resolve(&overrides, env);

        info!(
            topology = %protocol.topology,
            secured = protocol.secured,
            endpoints = connection.endpoints().len(),
            "RedisUrl loaded"
        );

        Ok(Self {
            connection,
            protocol,
            credentials,
        })
    }

    /// Parse a connection string, taking credentials from the process environment.
    pub fn parse(url: &str) -> UrlResult<Self> {
        Self::new(Some(url), CredentialsOverride::default())
    }

    /// Load everything from the process environment.
    pub fn from_env() -> UrlResult<Self> {
        Self::new(None, CredentialsOverride::default())
    }

    /// Get the original connection string, unmodified.
    pub fn raw_url(&self) -> &str {
        self.connection.as_str()
    }

    /// Check if the scheme is `redis:` or `rediss:`.
    pub fn single(&self) -> bool {
        self.protocol.topology == Topology::Single
    }

    /// Check if the scheme is one of the `rediss` variants.
    pub fn secured(&self) -> bool {
        self.protocol.secured
    }

    /// Check if the scheme is `redis-sentinel:` or `rediss-sentinel:`.
    pub fn uses_sentinel(&self) -> bool {
        self.protocol.topology == Topology::Sentinel
    }

    /// Check if the scheme is `redis-cluster:` or `rediss-cluster:`.
    pub fn clustered(&self) -> bool {
        self.protocol.topology == Topology::Cluster
    }

    /// Get the classified protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Get the topology.
    pub fn topology(&self) -> Topology {
        self.protocol.topology
    }

    /// Get the parsed connection string.
    pub fn connection_string(&self) -> &ConnectionString {
        &self.connection
    }

    /// Get the server endpoints.
    pub fn endpoints(&self) -> &[Endpoint] {
        self.connection.endpoints()
    }

    /// Get the query parameters.
    pub fn params(&self) -> &ParameterTable {
        self.connection.params()
    }

    /// Get the resolved credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolve the common option record.
    pub fn redis_options(&self) -> RedisOptions {
        RedisOptions::from_params(self.params())
    }

    /// Resolve the cluster option record, without credentials.
    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions::from_params(self.params())
    }

    /// Build the construction plan for this topology.
    ///
    /// Fails with [`UrlError::UnsupportedProtocol`] for unknown schemes.
    pub fn client_plan(&self) -> UrlResult<ClientPlan> {
        let secured = self.protocol.secured;
        let creds = &self.credentials;

        let plan = match self.protocol.topology {
            Topology::Single => ClientPlan::Single {
                endpoint: self.connection.endpoints()[0].clone(),
                options: self.redis_options(),
                username: creds.username().map(String::from),
                password: creds.password().map(String::from),
                secured,
            },
            Topology::Sentinel => {
                let options = self.redis_options();
                ClientPlan::Sentinel {
                    sentinels: self.connection.endpoints().to_vec(),
                    master_name: options.name.clone(),
                    options,
                    password: creds.password().map(String::from),
                    sentinel_password: creds.sentinel_password().map(String::from),
                    secured,
                }
            }
            Topology::Cluster => {
                let mut options = self.cluster_options();
                options.redis_options.username = creds.username().map(String::from);
                options.redis_options.password = creds.password().map(String::from);
                ClientPlan::Cluster {
                    nodes: self.connection.endpoints().to_vec(),
                    options,
                    secured,
                }
            }
            Topology::Unsupported => {
                return Err(UrlError::unsupported(self.connection.scheme()));
            }
        };

        debug!(topology = %plan.topology(), secured, "Client plan built");
        Ok(plan)
    }

    /// Build a client through the given factory.
    ///
    /// The handle is returned to the caller; nothing is retained here.
    pub fn get_client<F: ClientFactory>(&self, factory: &F) -> Result<F::Client, F::Error> {
        let plan = self.client_plan()?;
        factory.build(plan)
    }
}

impl std::str::FromStr for RedisUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapEnvSource, REDIS_PASSWORD, REDIS_SENTINEL_PASSWORD, REDIS_USERNAME};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn env() -> MapEnvSource {
        MapEnvSource::new()
            .set(REDIS_URL, "redis://env-host:6390")
            .set(REDIS_USERNAME, "env-user")
            .set(REDIS_PASSWORD, "env-pass")
            .set(REDIS_SENTINEL_PASSWORD, "env-sentinel")
    }

    fn load(url: &str) -> RedisUrl {
        RedisUrl::with_env(Some(url), CredentialsOverride::new(), &env()).unwrap()
    }

    #[derive(Default)]
    struct RecordingFactory {
        plans: RefCell<Vec<ClientPlan>>,
    }

    impl ClientFactory for RecordingFactory {
        type Client = Topology;
        type Error = UrlError;

        fn build(&self, plan: ClientPlan) -> Result<Topology, UrlError> {
            let topology = plan.topology();
            self.plans.borrow_mut().push(plan);
            Ok(topology)
        }
    }

    #[test]
    fn test_url_defaults_to_env() {
        let url = RedisUrl::with_env(None, CredentialsOverride::new(), &env()).unwrap();
        assert_eq!(url.raw_url(), "redis://env-host:6390");
        assert_eq!(url.endpoints(), &[Endpoint::new("env-host", 6390)]);
    }

    #[test]
    fn test_url_defaults_to_loopback() {
        let url =
            RedisUrl::with_env(None, CredentialsOverride::new(), &MapEnvSource::new()).unwrap();
        assert_eq!(url.raw_url(), "redis://127.0.0.1");
        assert!(url.single());
        assert_eq!(url.endpoints(), &[Endpoint::new("127.0.0.1", 6379)]);
    }

    #[test]
    fn test_topology_properties() {
        for scheme in ["redis", "rediss"] {
            let url = load(&format!("{scheme}://localhost"));
            assert!(url.single());
            assert!(!url.uses_sentinel());
            assert!(!url.clustered());
        }
        for scheme in ["redis-sentinel", "rediss-sentinel"] {
            let url = load(&format!("{scheme}://localhost"));
            assert!(!url.single());
            assert!(url.uses_sentinel());
            assert!(!url.clustered());
        }
        for scheme in ["redis-cluster", "rediss-cluster"] {
            let url = load(&format!("{scheme}://localhost"));
            assert!(!url.single());
            assert!(!url.uses_sentinel());
            assert!(url.clustered());
        }
    }

    #[test]
    fn test_secured_property() {
        assert!(load("rediss://localhost").secured());
        assert!(load("rediss-sentinel://localhost").secured());
        assert!(load("rediss-cluster://localhost").secured());
        assert!(!load("redis://localhost").secured());
        assert!(!load("redis-sentinel://localhost").secured());
        assert!(!load("redis-cluster://localhost").secured());
    }

    #[test]
    fn test_single_plan_uses_first_endpoint() {
        let plan = load("redis://first:6380,second:6381?db=4").client_plan().unwrap();
        match plan {
            ClientPlan::Single {
                endpoint,
                options,
                username,
                password,
                secured,
            } => {
                assert_eq!(endpoint, Endpoint::new("first", 6380));
                assert_eq!(options.db, 4);
                assert_eq!(username.as_deref(), Some("env-user"));
                assert_eq!(password.as_deref(), Some("env-pass"));
                assert!(!secured);
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn test_single_plan_overrides() {
        let overrides = CredentialsOverride::new().username("1234").password("1234");
        let url = RedisUrl::with_env(Some("redis://localhost"), overrides, &env()).unwrap();
        let ClientPlan::Single {
            username, password, ..
        } = url.client_plan().unwrap()
        else {
            panic!("expected a single plan");
        };
        assert_eq!(username.as_deref(), Some("1234"));
        assert_eq!(password.as_deref(), Some("1234"));
    }

    #[test]
    fn test_sentinel_plan() {
        let plan = load("redis-sentinel://s1:26379,s2:26380?name=mymaster")
            .client_plan()
            .unwrap();
        let ClientPlan::Sentinel {
            sentinels,
            master_name,
            password,
            sentinel_password,
            ..
        } = plan
        else {
            panic!("expected a sentinel plan");
        };
        assert_eq!(
            sentinels,
            vec![Endpoint::new("s1", 26379), Endpoint::new("s2", 26380)]
        );
        assert_eq!(master_name.as_deref(), Some("mymaster"));
        assert_eq!(password.as_deref(), Some("env-pass"));
        assert_eq!(sentinel_password.as_deref(), Some("env-sentinel"));
    }

    #[test]
    fn test_sentinel_password_override() {
        let overrides = CredentialsOverride::new().sentinel_password("1234");
        let url =
            RedisUrl::with_env(Some("redis-sentinel://localhost?name=mymaster"), overrides, &env())
                .unwrap();
        let ClientPlan::Sentinel {
            password,
            sentinel_password,
            ..
        } = url.client_plan().unwrap()
        else {
            panic!("expected a sentinel plan");
        };
        assert_eq!(sentinel_password.as_deref(), Some("1234"));
        assert_eq!(password.as_deref(), Some("env-pass"));
    }

    #[test]
    fn test_sentinel_plan_without_master_name() {
        let ClientPlan::Sentinel { master_name, .. } =
            load("redis-sentinel://localhost").client_plan().unwrap()
        else {
            panic!("expected a sentinel plan");
        };
        assert_eq!(master_name, None);
    }

    #[test]
    fn test_cluster_plan_injects_node_credentials() {
        let plan = load("redis-cluster://localhost").client_plan().unwrap();
        let ClientPlan::Cluster { nodes, options, .. } = plan else {
            panic!("expected a cluster plan");
        };
        assert_eq!(nodes, vec![Endpoint::new("localhost", 6379)]);
        assert_eq!(options.scale_reads, "master");
        assert_eq!(options.redis_options.username.as_deref(), Some("env-user"));
        assert_eq!(options.redis_options.password.as_deref(), Some("env-pass"));
    }

    #[test]
    fn test_cluster_options_are_fresh() {
        let url = load("redis-cluster://localhost");
        let mut first = url.cluster_options();
        first.max_redirections = 1;
        assert_eq!(url.cluster_options().max_redirections, 16);
        assert_eq!(url.cluster_options().redis_options.password, None);
    }

    #[test]
    fn test_unsupported_protocol() {
        let url = load("http://localhost");
        assert_eq!(url.topology(), Topology::Unsupported);
        assert!(!url.single() && !url.uses_sentinel() && !url.clustered());

        let err = url.client_plan().unwrap_err();
        assert_eq!(err, UrlError::UnsupportedProtocol("http:".to_string()));

        let factory = RecordingFactory::default();
        assert!(url.get_client(&factory).unwrap_err().is_unsupported_protocol());
        assert!(factory.plans.borrow().is_empty());
    }

    #[test]
    fn test_get_client_passes_plan() {
        let factory = RecordingFactory::default();
        let client = load("rediss-cluster://a:7000,b:7001").get_client(&factory).unwrap();
        assert_eq!(client, Topology::Cluster);

        let plans = factory.plans.borrow();
        assert_eq!(plans.len(), 1);
        assert!(plans[0].secured());
        assert_eq!(plans[0].endpoints().len(), 2);
    }

    #[test]
    fn test_raw_url_round_trip() {
        let raw = "rediss-sentinel://Host-A:26379,host-b/ignored?name=m&noDelay=false";
        assert_eq!(load(raw).raw_url(), raw);
    }

    #[test]
    fn test_format_error_on_construction() {
        let err = RedisUrl::with_env(
            Some("redis://localhost:port"),
            CredentialsOverride::new(),
            &env(),
        )
        .unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_from_str() {
        let url: RedisUrl = "redis-cluster://localhost:7000".parse().unwrap();
        assert!(url.clustered());
    }
}
