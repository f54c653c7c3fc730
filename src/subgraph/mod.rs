//! A layer of abstraction over the GraphQL subgraph so the publishing
//! sequence can run against canned pool data in tests.

use crate::error::FetchError;
use crate::pools::PoolRecord;

#[cfg(test)]
pub mod mock;
pub mod real;

/// The pools query sent to the subgraph.
pub const POOLS_QUERY: &str = r#"
query MyQuery {
    pools(orderBy: volumeUSD) {
        liquidity
        liquidityProviderCount
        id
        sqrtPrice
        token0Price
        token1Price
        token0 {
            decimals
            name
            symbol
        }
        token1 {
            decimals
            name
            symbol
        }
    }
}"#;

/// A trait for fetching pool records from a subgraph.
pub(crate) trait Subgraph {
    /// Run the pools query once and return every pool it yields.
    async fn fetch_pools(&self) -> Result<Vec<PoolRecord>, FetchError>;
}
