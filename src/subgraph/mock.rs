//! A mock implementation of the [`Subgraph`] trait that serves canned pools
//! or a canned failure.

use reqwest::StatusCode;

use super::Subgraph;
use crate::error::FetchError;
use crate::pools::PoolRecord;

pub(crate) enum MockSubgraph {
    Pools(Vec<PoolRecord>),
    Unavailable,
}

impl Subgraph for MockSubgraph {
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError> {
        match self {
            MockSubgraph::Pools(pools) => Ok(pools.clone()),
            MockSubgraph::Unavailable => Err(FetchError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "upstream connect error".to_string(),
            }),
        }
    }
}
