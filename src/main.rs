#![warn(clippy::complexity)]

use ::beamswap_pools::env::Env;
use ::beamswap_pools::publish_pools;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::init();
    let http = env.http_client()?;
    let dune = env.connect_dune(http.clone())?;
    let subgraph = env.connect_subgraph(http);

    publish_pools(
        &env.table(),
        env.private_table,
        env.on_fetch_failure,
        &subgraph,
        &dune,
    )
    .await?;

    Ok(())
}
