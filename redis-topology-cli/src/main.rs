//! redis-topology CLI - Inspect and test Redis connection strings.

use clap::Parser;

use redis_topology_cli::cli::{Cli, Command};
use redis_topology_cli::commands;
use redis_topology_cli::error::CliResult;
use redis_topology_cli::output;

#[tokio::main]
async fn main() {
    redis_topology_url::logging::init();

    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        if let Some(help) = miette::Diagnostic::help(&e) {
            output::dim(&help.to_string());
        }
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => commands::inspect::run(args).await,
        Command::Connect(args) => commands::connect::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
