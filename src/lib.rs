//! A CLI tool for fetching liquidity pools from a GraphQL subgraph,
//! flattening them into table rows and replacing a Dune table with them.

use anyhow::Context;
use tracing::*;

pub mod env;
pub mod error;
#[cfg(test)]
mod http_stub;
pub mod ndjson;
pub mod pools;
pub mod subgraph;
pub mod table;

use error::TableError;
use subgraph::Subgraph;
use table::{ContentType, TableRef, TableStore, POOL_COLUMNS};

/// What to do with the table when the subgraph cannot be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchFailurePolicy {
    /// Replace the table with an empty one.
    PublishEmpty,
    /// Stop before touching the table.
    Abort,
}

/// What a publishing run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub rows_written: u64,
    pub fetch_failed: bool,
}

/// Fetch all pools from the subgraph and replace `table` with their
/// flattened rows.
///
/// Steps run strictly in order: fetch, delete, create, insert.
#[allow(private_bounds)]
pub async fn publish_pools(
    table: &TableRef,
    is_private: bool,
    on_fetch_failure: FetchFailurePolicy,
    subgraph: &impl Subgraph,
    tables: &impl TableStore,
) -> anyhow::Result<PublishSummary> {
    let (records, fetch_failed) = match subgraph.fetch_pools().await {
        Ok(records) => (records, false),
        Err(err) => match on_fetch_failure {
            FetchFailurePolicy::Abort => {
                return Err(err).context("Failed to fetch pools");
            }
            FetchFailurePolicy::PublishEmpty => {
                warn!("Publishing an empty {table} after fetch failure: {err}");
                (vec![], true)
            }
        },
    };

    let rows = pools::flatten_all(&records);
    debug!("Flattened rows: {rows:?}");

    match tables.delete_table(table).await {
        Ok(()) => info!("Deleted table {table}"),
        Err(TableError::NotFound { .. }) => {
            debug!("Table {table} does not exist yet")
        }
        Err(err) => {
            return Err(err).context(format!("Failed to delete table {table}"))
        }
    }

    let created = tables
        .create_table(table, &POOL_COLUMNS, is_private)
        .await
        .with_context(|| format!("Failed to create table {table}"))?;
    info!(
        "Created table {} (already existed: {})",
        created.full_name, created.already_existed
    );

    let payload = ndjson::encode(&rows)?;
    let inserted = tables
        .insert(table, payload, ContentType::NdJson)
        .await
        .with_context(|| format!("Failed to insert rows into {table}"))?;
    info!(
        "Inserted {} of {} rows ({} bytes) into {table}",
        inserted.rows_written,
        rows.len(),
        inserted.bytes_written
    );

    Ok(PublishSummary { rows_written: inserted.rows_written, fetch_failed })
}
