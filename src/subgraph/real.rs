//! The [`Subgraph`] implementation that queries a GraphQL endpoint over HTTP.

use itertools::Itertools;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::*;

use super::{Subgraph, POOLS_QUERY};
use crate::error::FetchError;
use crate::pools::PoolRecord;

/// HTTP client for a GraphQL subgraph endpoint.
pub struct GraphClient {
    endpoint: String,
    http: Client,
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<PoolsData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct PoolsData {
    pools: Option<Vec<PoolRecord>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphClient {
    pub fn new(endpoint: String, http: Client) -> Self {
        Self { endpoint, http }
    }

    fn pools_request(&self) -> RequestBuilder {
        self.http.post(&self.endpoint).json(&QueryBody { query: POOLS_QUERY })
    }

    async fn query_pools(&self) -> Result<Vec<PoolRecord>, FetchError> {
        debug!("Querying pools from {}", self.endpoint);

        let response = self.pools_request().send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status { status, body });
        }

        decode_pools(&body)
    }
}

impl Subgraph for GraphClient {
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError> {
        let pools = self.query_pools().await;

        match &pools {
            Ok(pools) => info!("Fetched {} pools from the subgraph", pools.len()),
            Err(err) => {
                error!("Error fetching pools from {}: {err}", self.endpoint)
            }
        }

        pools
    }
}

/// Extract `data.pools` from a GraphQL response body.
///
/// A response carrying an `errors` array is a failure even if partial data is
/// present.
fn decode_pools(body: &str) -> Result<Vec<PoolRecord>, FetchError> {
    let GraphQlResponse { data, errors } = serde_json::from_str(body)?;

    if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|err| err.message).join("; ");
        return Err(FetchError::GraphQl(messages));
    }

    data.and_then(|data| data.pools).ok_or(FetchError::MissingData)
}
