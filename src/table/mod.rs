//! The hosted analytics table the flattened pools are published to.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

pub mod dune;
#[cfg(test)]
pub mod mock;

/// Fully qualified name of a table on the table service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub namespace: String,
    pub table_name: String,
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.table_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Double,
    Integer,
    Varchar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl Column {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, nullable: true }
    }
}

/// Schema of the pools table, in the column order of
/// [`FlatRow`](crate::pools::FlatRow).
pub const POOL_COLUMNS: [Column; 12] = [
    Column::new("liquidity", ColumnType::Double),
    Column::new("liquidity_provider_count", ColumnType::Integer),
    Column::new("id", ColumnType::Varchar),
    Column::new("sqrt_price", ColumnType::Double),
    Column::new("token0_price", ColumnType::Double),
    Column::new("token1_price", ColumnType::Double),
    Column::new("token0_decimals", ColumnType::Integer),
    Column::new("token0_name", ColumnType::Varchar),
    Column::new("token0_symbol", ColumnType::Varchar),
    Column::new("token1_decimals", ColumnType::Integer),
    Column::new("token1_name", ColumnType::Varchar),
    Column::new("token1_symbol", ColumnType::Varchar),
];

/// Encoding of an insert payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    NdJson,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::NdJson => "application/x-ndjson",
        }
    }
}

/// Outcome of a table creation as reported by the table service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreatedTable {
    pub namespace: String,
    pub table_name: String,
    pub full_name: String,
    pub example_query: String,
    pub already_existed: bool,
    pub message: String,
}

/// Outcome of an insert as reported by the table service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InsertedRows {
    pub rows_written: u64,
    pub bytes_written: u64,
    pub name: String,
}

/// A trait for the table operations needed to replace a table wholesale.
pub(crate) trait TableStore {
    /// Delete a table. Fails with [`TableError::NotFound`] if there is no such
    /// table.
    async fn delete_table(&self, table: &TableRef) -> Result<(), TableError>;

    /// Create an empty table with the given schema.
    async fn create_table(
        &self,
        table: &TableRef,
        schema: &[Column],
        is_private: bool,
    ) -> Result<CreatedTable, TableError>;

    /// Append the encoded rows in `payload` to a table.
    async fn insert(
        &self,
        table: &TableRef,
        payload: Vec<u8>,
        content_type: ContentType,
    ) -> Result<InsertedRows, TableError>;
}
