//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use redis_topology_url::CredentialsOverride;

/// redis-topology - Inspect and test Redis connection strings
#[derive(Parser, Debug)]
#[command(name = "redis-topology")]
#[command(version)]
#[command(
    about = "redis-topology - Inspect and test Redis connection strings",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the topology, endpoints and resolved options of a connection string
    Inspect(InspectArgs),

    /// Connect to the server(s) described by a connection string, then quit
    Connect(ConnectArgs),

    /// Display version information
    Version,
}

/// Connection string and credential flags shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Connection string (defaults to $REDIS_URL, then redis://127.0.0.1)
    pub url: Option<String>,

    /// Username (defaults to $REDIS_USERNAME)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Data-node password (defaults to $REDIS_PASSWORD)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Sentinel password (defaults to $REDIS_SENTINEL_PASSWORD)
    #[arg(long)]
    pub sentinel_password: Option<String>,
}

impl TargetArgs {
    /// Collect the credential flags into an override record.
    pub fn overrides(&self) -> CredentialsOverride {
        CredentialsOverride {
            username: self.username.clone(),
            password: self.password.clone(),
            sentinel_password: self.sentinel_password.clone(),
        }
    }
}

/// Arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print machine-readable JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `connect` command
#[derive(Args, Debug)]
pub struct ConnectArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inspect_args() {
        let cli = Cli::parse_from([
            "redis-topology",
            "inspect",
            "redis-sentinel://s1,s2?name=mymaster",
            "--password",
            "secret",
            "--sentinel-password",
            "s3cret",
            "--json",
        ]);

        match cli.command {
            Command::Inspect(args) => {
                assert!(args.json);
                assert_eq!(
                    args.target.url.as_deref(),
                    Some("redis-sentinel://s1,s2?name=mymaster")
                );
                let overrides = args.target.overrides();
                assert_eq!(overrides.username, None);
                assert_eq!(overrides.password.as_deref(), Some("secret"));
                assert_eq!(overrides.sentinel_password.as_deref(), Some("s3cret"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_url_is_optional() {
        let cli = Cli::parse_from(["redis-topology", "connect"]);
        match cli.command {
            Command::Connect(args) => assert!(args.target.url.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
