//! Option records resolved from connection-string parameters.
//!
//! Every parameter is text. Resolution never fails: absent or unusable
//! values fall back to the documented default for the field.
//!
//! # Conventions
//!
//! - Boolean parameters follow a per-field [`Flag`] policy. A `DefaultTrue`
//!   flag is only turned off by the exact string `"false"`; a `DefaultFalse`
//!   flag is only turned on by the exact string `"true"`. Values such as `"0"`,
//!   `"no"` or `"TRUE"` leave the default in place.
//! - Numeric parameters are parsed as unsigned integers. Absent, non-numeric,
//!   negative, overflowing and zero values resolve to the default.
//! - Text parameters treat the empty string as absent.

use crate::credentials::mask_secret;
use crate::parser::ParameterTable;
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::trace;

/// Default policy of a boolean parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `true` unless the value is exactly `"false"`.
    DefaultTrue,
    /// `false` unless the value is exactly `"true"`.
    DefaultFalse,
}

impl Flag {
    /// Resolve a raw parameter value under this policy.
    pub fn resolve(self, value: Option<&str>) -> bool {
        match self {
            Self::DefaultTrue => value != Some("false"),
            Self::DefaultFalse => value == Some("true"),
        }
    }
}

/// Fixed reconnect policy handed to the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RetryStrategy {
    /// Wait the same delay before every attempt.
    Fixed {
        /// Delay in milliseconds.
        delay_ms: u64,
    },
}

impl RetryStrategy {
    /// Delay used by the default strategy.
    pub const DEFAULT_DELAY_MS: u64 = 1000;

    /// Get the delay before the given reconnect attempt.
    pub fn delay_for(&self, _attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay_ms } => Duration::from_millis(*delay_ms),
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::Fixed {
            delay_ms: Self::DEFAULT_DELAY_MS,
        }
    }
}

/// Reconnect-on-error policy. Automatic reconnects on command errors are never enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconnectOnError {
    /// Command errors never trigger a reconnect.
    #[default]
    Disabled,
}

/// Where cluster reads are routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleReads {
    /// Primaries only.
    Master,
    /// Replicas only.
    Slave,
    /// Primaries and replicas.
    All,
    /// Any other value, passed through untouched.
    Custom(String),
}

impl From<&str> for ScaleReads {
    fn from(value: &str) -> Self {
        match value {
            "master" => Self::Master,
            "slave" => Self::Slave,
            "all" => Self::All,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Connection options shared by every topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisOptions {
    /// Sentinel master name.
    pub name: Option<String>,
    /// IP address family (4 or 6).
    pub family: u8,
    /// Unix socket path.
    pub path: Option<String>,
    /// TCP keep-alive initial delay in milliseconds; 0 disables it.
    pub keep_alive: u64,
    /// Disable Nagle's algorithm.
    pub no_delay: bool,
    /// Name announced with `CLIENT SETNAME`.
    pub connection_name: Option<String>,
    /// Database index.
    pub db: u32,
    /// Drop buffer support for replies.
    pub drop_buffer_support: bool,
    /// Wait for the server to report ready before issuing commands.
    pub enable_ready_check: bool,
    /// Queue commands while disconnected.
    pub enable_offline_queue: bool,
    /// Connect timeout in milliseconds.
    pub connect_timeout: u64,
    /// Re-subscribe channels after a reconnect.
    pub auto_resubscribe: bool,
    /// Resend pending commands after a reconnect.
    pub auto_resend_unfulfilled_commands: bool,
    /// Defer connecting until the caller asks for it.
    pub lazy_connect: bool,
    /// Prefix prepended to every key.
    pub key_prefix: String,
    /// Reconnect delay policy.
    pub retry_strategy: RetryStrategy,
    /// Retries per command; 0 means a single attempt.
    pub max_retries_per_request: u32,
    /// Reconnect-on-error policy.
    pub reconnect_on_error: ReconnectOnError,
    /// Issue `READONLY` after connecting (cluster replicas).
    pub read_only: bool,
    /// Return numbers as strings.
    pub string_numbers: bool,
    /// Pipeline commands issued in the same tick.
    pub enable_auto_pipelining: bool,
    /// Commands never auto-pipelined.
    pub auto_pipelining_ignored_commands: Vec<String>,
    /// How long a loaded script stays cached, in milliseconds.
    pub max_scripts_caching_time: u64,
}

impl Default for RedisOptions {
    fn default() -> Self {
        Self::from_params(&ParameterTable::new())
    }
}

impl RedisOptions {
    /// Resolve the common option record from query parameters.
    pub fn from_params(params: &ParameterTable) -> Self {
        trace!(params = params.len(), "RedisOptions::from_params()");

        Self {
            name: text(params, "name"),
            family: number(params, "family", 4),
            path: text(params, "path"),
            keep_alive: number(params, "keepAlive", 0),
            no_delay: flag(params, "noDelay", Flag::DefaultTrue),
            connection_name: text(params, "connectionName"),
            db: number(params, "db", 0),
            drop_buffer_support: flag(params, "dropBufferSupport", Flag::DefaultFalse),
            enable_ready_check: flag(params, "enableReadyCheck", Flag::DefaultTrue),
            enable_offline_queue: flag(params, "enableOfflineQueue", Flag::DefaultTrue),
            connect_timeout: number(params, "connectTimeout", 10_000),
            auto_resubscribe: flag(params, "autoResubscribe", Flag::DefaultTrue),
            auto_resend_unfulfilled_commands: flag(
                params,
                "autoResendUnfulfilledCommands",
                Flag::DefaultTrue,
            ),
            lazy_connect: flag(params, "lazyConnect", Flag::DefaultFalse),
            key_prefix: text(params, "keyPrefix").unwrap_or_default(),
            retry_strategy: RetryStrategy::default(),
            max_retries_per_request: number(params, "maxRetriesPerRequest", 0),
            reconnect_on_error: ReconnectOnError::Disabled,
            read_only: flag(params, "readOnly", Flag::DefaultFalse),
            string_numbers: flag(params, "stringNumbers", Flag::DefaultFalse),
            enable_auto_pipelining: flag(params, "enableAutoPipelining", Flag::DefaultFalse),
            auto_pipelining_ignored_commands: params
                .get("autoPipeliningIgnoredCommands")
                .map(|value| {
                    value
                        .split(',')
                        .filter(|command| !command.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            max_scripts_caching_time: number(params, "maxScriptsCachingTime", 60_000),
        }
    }

    /// Get the connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout)
    }
}

/// Per-node options embedded in a cluster record.
///
/// Unlike [`RedisOptions`] this record carries the node credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeOptions {
    /// The common options.
    #[serde(flatten)]
    pub options: RedisOptions,
    /// Username for every node.
    pub username: Option<String>,
    /// Password for every node.
    #[serde(serialize_with = "mask_secret")]
    pub password: Option<String>,
}

impl NodeOptions {
    /// Wrap common options without credentials.
    pub fn new(options: RedisOptions) -> Self {
        Self {
            options,
            username: None,
            password: None,
        }
    }
}

/// Options for a cluster connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    /// Queue commands while the cluster is unreachable.
    pub enable_offline_queue: bool,
    /// Wait for `CLUSTER INFO` to report ok.
    pub enable_ready_check: bool,
    /// Read routing, verbatim (`master`, `slave`, `all`, ...).
    pub scale_reads: String,
    /// Maximum `MOVED`/`ASK` redirections per command.
    pub max_redirections: u32,
    /// Delay before resending after a failover, in milliseconds.
    pub retry_delay_on_failover: u64,
    /// Delay before resending on `CLUSTERDOWN`, in milliseconds.
    pub retry_delay_on_cluster_down: u64,
    /// Delay before resending on `TRYAGAIN`, in milliseconds.
    pub retry_delay_on_try_again: u64,
    /// Cluster-level reconnect delay policy.
    pub cluster_retry_strategy: RetryStrategy,
    /// Timeout for refreshing the slot table, in milliseconds.
    pub slots_refresh_timeout: u64,
    /// Interval between slot table refreshes, in milliseconds.
    pub slots_refresh_interval: u64,
    /// Options applied to each node connection.
    pub redis_options: NodeOptions,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self::from_params(&ParameterTable::new())
    }
}

impl ClusterOptions {
    /// Resolve the cluster option record from query parameters.
    pub fn from_params(params: &ParameterTable) -> Self {
        trace!(params = params.len(), "ClusterOptions::from_params()");

        Self {
            enable_offline_queue: flag(params, "enableOfflineQueue", Flag::DefaultTrue),
            enable_ready_check: flag(params, "enableReadyCheck", Flag::DefaultTrue),
            scale_reads: text(params, "scaleReads").unwrap_or_else(|| "master".to_string()),
            max_redirections: number(params, "maxRedirections", 16),
            retry_delay_on_failover: number(params, "retryDelayOnFailover", 100),
            retry_delay_on_cluster_down: number(params, "retryDelayOnClusterDown", 100),
            retry_delay_on_try_again: number(params, "retryDelayOnTryAgain", 100),
            cluster_retry_strategy: RetryStrategy::default(),
            slots_refresh_timeout: number(params, "slotsRefreshTimeout", 1000),
            slots_refresh_interval: number(params, "slotsRefreshInterval", 5000),
            redis_options: NodeOptions::new(RedisOptions::from_params(params)),
        }
    }

    /// Get the typed read routing.
    pub fn scale_reads_mode(&self) -> ScaleReads {
        ScaleReads::from(self.scale_reads.as_str())
    }
}

fn flag(params: &ParameterTable, key: &str, policy: Flag) -> bool {
    policy.resolve(params.get(key))
}

fn number<T>(params: &ParameterTable, key: &str, default: T) -> T
where
    T: FromStr + Default + PartialEq,
{
    params
        .get(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value != T::default())
        .unwrap_or(default)
}

fn text(params: &ParameterTable, key: &str) -> Option<String> {
    params.get_non_empty(key).map(String::from)
}
