//! Mapping of client plans onto `fred` configuration, and connecting.

use fred::prelude::{
    Builder, Client, ClientLike, Config, ConnectionConfig, PerformanceConfig, ReconnectPolicy,
    ServerConfig, TcpConfig,
};
use redis_topology_url::{ClientFactory, ClientPlan, RedisOptions, RedisUrl, RetryStrategy};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Everything handed to the `fred` builder for one plan.
#[derive(Debug, Clone)]
pub struct FredSettings {
    /// Server layout, credentials and database.
    pub config: Config,
    /// Timeouts, retries and socket options.
    pub connection: ConnectionConfig,
    /// Command feed and timeout tuning (library defaults).
    pub performance: PerformanceConfig,
    /// Reconnect policy.
    pub policy: ReconnectPolicy,
}

impl FredSettings {
    /// Translate a plan.
    pub fn from_plan(plan: &ClientPlan) -> ClientResult<Self> {
        let options = plan.redis_options();
        let database =
            u8::try_from(options.db).map_err(|_| ClientError::InvalidDatabase(options.db))?;

        let mut config = Config {
            database: (database > 0).then_some(database),
            fail_fast: !options.enable_offline_queue,
            ..Config::default()
        };
        let mut connection = ConnectionConfig::default();
        apply_connection_options(&mut connection, options);

        match plan {
            ClientPlan::Single {
                endpoint,
                username,
                password,
                ..
            } => {
                config.server = ServerConfig::new_centralized(endpoint.host.clone(), endpoint.port);
                config.username = username.clone();
                config.password = password.clone();
            }
            ClientPlan::Sentinel {
                sentinels,
                master_name,
                password,
                sentinel_password,
                ..
            } => {
                let service_name = master_name.clone().ok_or(ClientError::MissingMasterName)?;
                let hosts: Vec<(String, u16)> =
                    sentinels.iter().map(|e| (e.host.clone(), e.port)).collect();

                let mut server = ServerConfig::new_sentinel(hosts, service_name);
                if let ServerConfig::Sentinel { password: auth, .. } = &mut server {
                    auth.clone_from(sentinel_password);
                }
                config.server = server;
                config.password = password.clone();
            }
            ClientPlan::Cluster { nodes, options, .. } => {
                let hosts: Vec<(String, u16)> =
                    nodes.iter().map(|e| (e.host.clone(), e.port)).collect();
                config.server = ServerConfig::new_clustered(hosts);
                config.username = options.redis_options.username.clone();
                config.password = options.redis_options.password.clone();
                config.fail_fast = !options.enable_offline_queue;
                connection.max_redirections = options.max_redirections;
            }
        }

        if plan.secured() {
            warn!(
                topology = %plan.topology(),
                "secured scheme requested but no TLS configuration is attached"
            );
        }

        Ok(Self {
            config,
            connection,
            performance: PerformanceConfig::default(),
            policy: reconnect_policy(options.retry_strategy),
        })
    }
}

fn apply_connection_options(connection: &mut ConnectionConfig, options: &RedisOptions) {
    connection.connection_timeout = options.connect_timeout();
    connection.max_command_attempts = options.max_retries_per_request.saturating_add(1);
    connection.reconnect_on_auth_error = false;
    connection.tcp = TcpConfig {
        nodelay: Some(options.no_delay),
        ..TcpConfig::default()
    };
}

fn reconnect_policy(strategy: RetryStrategy) -> ReconnectPolicy {
    match strategy {
        RetryStrategy::Fixed { delay_ms } => {
            ReconnectPolicy::new_constant(0, u32::try_from(delay_ms).unwrap_or(u32::MAX))
        }
    }
}

/// [`ClientFactory`] backed by `fred`.
///
/// Building does not touch the network; call [`ClientLike::init`] on the
/// returned client, or use [`connect`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FredFactory;

impl ClientFactory for FredFactory {
    type Client = Client;
    type Error = ClientError;

    fn build(&self, plan: ClientPlan) -> ClientResult<Client> {
        let FredSettings {
            config,
            connection,
            performance,
            policy,
        } = FredSettings::from_plan(&plan)?;

        let client = Builder::from_config(config)
            .with_connection_config(|c| *c = connection)
            .with_performance_config(|p| *p = performance)
            .set_policy(policy)
            .build()?;

        info!(
            topology = %plan.topology(),
            endpoints = plan.endpoints().len(),
            "Redis client built"
        );
        Ok(client)
    }
}

/// Build a client for the connection string and connect it.
///
/// With `lazyConnect=true` the client is returned unconnected.
pub async fn connect(url: &RedisUrl) -> ClientResult<Client> {
    let lazy = url.redis_options().lazy_connect;
    let client = url.get_client(&FredFactory)?;

    if lazy {
        debug!("lazyConnect set, skipping initial connection");
    } else {
        let _task = client.init().await?;
        debug!("Redis client connected");
    }

    Ok(client)
}
