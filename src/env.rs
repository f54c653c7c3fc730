//! A module for parsing the environment variables and initializing the
//! [`Env`] struct.

use clap::Parser;
use reqwest::Client;

use crate::error::ConfigError;
use crate::subgraph::real::GraphClient;
use crate::table::dune::DuneClient;
use crate::table::TableRef;
use crate::FetchFailurePolicy;

const BEAMSWAP_V3_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/beamswap/beamswap-v3";

/// Configuration options for the CLI tool.
///
/// The options can be set by environment variables or command line arguments.
#[derive(Debug, Parser)]
pub struct Env {
    /// The log level to use.
    #[clap(long, env, default_value = "INFO")]
    pub log_level: tracing::Level,

    /// The GraphQL endpoint of the subgraph to query pools from.
    #[clap(long, env, default_value = BEAMSWAP_V3_SUBGRAPH_URL)]
    pub subgraph_url: String,

    /// The base URL of the Dune API.
    #[clap(long, env, default_value = "https://api.dune.com")]
    pub dune_api_url: String,

    /// The Dune API key used to manage and upload to the table.
    #[clap(long, env, hide_env_values = true)]
    pub dune_api_key: Option<String>,

    /// The Dune namespace that owns the table.
    #[clap(long, env, default_value = "substrate")]
    pub namespace: String,

    /// The name of the table to replace.
    #[clap(long, env, default_value = "beamswap_pools_v3")]
    pub table_name: String,

    /// Create the table as private.
    #[clap(long, env)]
    pub private_table: bool,

    /// What to do when the subgraph cannot be queried.
    #[clap(
        long,
        env,
        value_enum,
        default_value_t = FetchFailurePolicy::PublishEmpty
    )]
    pub on_fetch_failure: FetchFailurePolicy,
}

impl Env {
    /// Read the configuration from the environment and set up logging.
    pub fn init() -> Self {
        dotenv::dotenv().ok();
        let env = Env::parse();
        let env_filter = format!(
            "none,beamswap_pools={log_level}",
            log_level = &env.log_level
        );

        tracing_subscriber::fmt()
            .with_max_level(env.log_level)
            .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
            .init();

        env
    }

    /// The table the pools are published to.
    pub fn table(&self) -> TableRef {
        TableRef {
            namespace: self.namespace.clone(),
            table_name: self.table_name.clone(),
        }
    }

    /// Build the HTTP client shared by the subgraph and Dune clients.
    pub fn http_client(&self) -> Result<Client, ConfigError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(client)
    }

    /// Create a client for the configured subgraph endpoint.
    pub fn connect_subgraph(&self, http: Client) -> GraphClient {
        GraphClient::new(self.subgraph_url.clone(), http)
    }

    /// Create a Dune client, failing if no API key is configured.
    pub fn connect_dune(&self, http: Client) -> Result<DuneClient, ConfigError> {
        let api_key = self
            .dune_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(DuneClient::new(&self.dune_api_url, api_key.to_string(), http))
    }
}
