//! `redis-topology inspect` command - Show how a connection string resolves.

use serde::Serialize;

use redis_topology_url::{ClientPlan, ClusterOptions, RedisOptions, RedisUrl, mask};

use crate::cli::InspectArgs;
use crate::error::CliResult;
use crate::output::{self, kv};

/// Resolved view of a connection string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The connection string as given.
    pub url: String,
    /// Scheme including the trailing colon.
    pub scheme: String,
    /// Topology name.
    pub topology: &'static str,
    /// Whether the scheme asks for a secured transport.
    pub secured: bool,
    /// Endpoints as `host:port`.
    pub endpoints: Vec<String>,
    /// Masked credentials.
    pub credentials: MaskedCredentials,
    /// Sentinel master name, when the topology is sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_name: Option<String>,
    /// Resolved option record.
    pub options: ReportOptions,
}

/// Credentials with secrets masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCredentials {
    /// Username, shown as is.
    pub username: Option<String>,
    /// Data-node password.
    pub password: Option<&'static str>,
    /// Sentinel password.
    pub sentinel_password: Option<&'static str>,
}

/// The option record matching the topology.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportOptions {
    /// Single and sentinel connections.
    Redis(RedisOptions),
    /// Cluster connections, with node credentials injected.
    Cluster(Box<ClusterOptions>),
}

impl Report {
    /// Build a report.
    ///
    /// Unsupported schemes still produce a report; only the option record
    /// falls back to the common one.
    pub fn new(url: &RedisUrl) -> Self {
        let credentials = url.credentials();
        let plan = url.client_plan().ok();

        let master_name = match &plan {
            Some(ClientPlan::Sentinel { master_name, .. }) => master_name.clone(),
            _ => None,
        };
        let options = match plan {
            Some(ClientPlan::Cluster { options, .. }) => ReportOptions::Cluster(Box::new(options)),
            _ => ReportOptions::Redis(url.redis_options()),
        };

        Self {
            url: url.raw_url().to_string(),
            scheme: url.connection_string().scheme().to_string(),
            topology: url.topology().name(),
            secured: url.secured(),
            endpoints: url.endpoints().iter().map(ToString::to_string).collect(),
            credentials: MaskedCredentials {
                username: credentials.username().map(str::to_string),
                password: mask(credentials.password()),
                sentinel_password: mask(credentials.sentinel_password()),
            },
            master_name,
            options,
        }
    }
}

/// Run the inspect command
pub async fn run(args: InspectArgs) -> CliResult<()> {
    let url = RedisUrl::new(args.target.url.as_deref(), args.target.overrides())?;
    let report = Report::new(&url);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header("Connection String");
    kv("URL", &report.url);
    kv("Scheme", &report.scheme);
    kv("Topology", report.topology);
    kv("Secured", if report.secured { "yes" } else { "no" });
    if let Some(name) = &report.master_name {
        kv("Master", name);
    }
    output::newline();

    output::section("Endpoints");
    for endpoint in &report.endpoints {
        output::list_item(endpoint);
    }
    output::newline();

    output::section("Credentials");
    kv("Username", &output::or_none(report.credentials.username.as_deref()));
    kv("Password", &output::or_none(report.credentials.password));
    kv(
        "Sentinel password",
        &output::or_none(report.credentials.sentinel_password),
    );
    output::newline();

    output::section("Options");
    let options = serde_json::to_value(&report.options)?;
    if let serde_json::Value::Object(map) = options {
        for (key, value) in map {
            kv(&key, &value.to_string());
        }
    }
    output::newline();

    if !url.topology().is_supported() {
        output::warn(&format!(
            "Scheme {} is not supported; no client can be built",
            report.scheme
        ));
    } else if report.secured {
        output::info("Secured scheme: TLS settings must be supplied to the client separately");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis_topology_url::{CredentialsOverride, MapEnvSource};

    fn url(raw: &str, overrides: CredentialsOverride) -> RedisUrl {
        RedisUrl::with_env(Some(raw), overrides, &MapEnvSource::new()).unwrap()
    }

    #[test]
    fn test_report_masks_secrets() {
        let report = Report::new(&url(
            "redis-sentinel://s1:26379,s2?name=mymaster&db=1",
            CredentialsOverride::new()
                .username("app")
                .password("secret")
                .sentinel_password("s3cret"),
        ));

        assert_eq!(report.topology, "sentinel");
        assert_eq!(report.endpoints, vec!["s1:26379", "s2:6379"]);
        assert_eq!(report.master_name.as_deref(), Some("mymaster"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"username\":\"app\""));
        assert!(!json.contains("secret"));
        assert!(!json.contains("s3cret"));
    }

    #[test]
    fn test_cluster_report_uses_cluster_options() {
        let report = Report::new(&url(
            "redis-cluster://a:7000,b:7001?scaleReads=slave",
            CredentialsOverride::new().password("node-pass"),
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["options"]["scaleReads"], "slave");
        assert_eq!(json["options"]["maxRedirections"], 16);
        assert_eq!(json["options"]["redisOptions"]["password"], "***");
    }

    #[test]
    fn test_unsupported_scheme_still_reports() {
        let report = Report::new(&url("memcached://cache", CredentialsOverride::new()));
        assert_eq!(report.topology, "unsupported");
        assert!(!report.secured);
        assert!(matches!(report.options, ReportOptions::Redis(_)));
    }
}
