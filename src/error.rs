//! Error types returned by the subgraph fetcher, the table client and the
//! startup configuration check.

use reqwest::StatusCode;

/// Failure to fetch pool records from the subgraph.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to subgraph failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("subgraph returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed subgraph response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("subgraph query failed: {0}")]
    GraphQl(String),

    #[error("subgraph response has no data.pools field")]
    MissingData,
}

/// Failure of a call against the hosted table service.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table {namespace}.{table_name} does not exist")]
    NotFound { namespace: String, table_name: String },

    #[error("table API returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("request to table API failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Invalid or incomplete configuration detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no Dune API key configured, set DUNE_API_KEY or pass --dune-api-key")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
