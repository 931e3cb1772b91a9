//! `redis-topology connect` command - Try a connection, then quit.

use redis_topology_client::prelude::*;
use redis_topology_url::RedisUrl;
use tokio::time::timeout;

use crate::cli::ConnectArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the connect command
pub async fn run(args: ConnectArgs) -> CliResult<()> {
    let url = RedisUrl::new(args.target.url.as_deref(), args.target.overrides())?;

    output::info(&format!(
        "Connecting to {} ({} endpoint(s), {})",
        url.topology(),
        url.endpoints().len(),
        if url.secured() { "secured" } else { "plain" }
    ));

    // The reconnect policy retries forever, so the wait is bounded here.
    let wait = url.redis_options().connect_timeout();
    let client = url.get_client(&FredFactory)?;
    let _connection = timeout(wait, client.init())
        .await
        .map_err(|_| CliError::Timeout(wait.as_millis()))?
        .map_err(ClientError::from)?;

    output::success("Connected");

    client.quit().await.map_err(ClientError::from)?;
    output::dim("Connection closed");

    Ok(())
}
