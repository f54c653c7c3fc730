//! A mock implementation of the [`TableStore`] trait that records every call
//! and can be told to fail individual steps.

use std::sync::Mutex;

use reqwest::StatusCode;

use super::{Column, ContentType, CreatedTable, InsertedRows, TableRef, TableStore};
use crate::error::TableError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TableCall {
    Delete(TableRef),
    Create { table: TableRef, columns: usize, is_private: bool },
    Insert { table: TableRef, payload: Vec<u8>, content_type: ContentType },
}

/// How the mock answers a delete.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum DeleteOutcome {
    #[default]
    Deleted,
    Missing,
    Unauthorized,
}

#[derive(Default)]
pub(crate) struct MockTables {
    pub delete_outcome: DeleteOutcome,
    pub fail_create: bool,
    pub calls: Mutex<Vec<TableCall>>,
}

impl MockTables {
    pub(crate) fn calls(&self) -> Vec<TableCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: TableCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TableStore for MockTables {
    async fn delete_table(&self, table: &TableRef) -> Result<(), TableError> {
        self.record(TableCall::Delete(table.clone()));

        match self.delete_outcome {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::Missing => Err(TableError::NotFound {
                namespace: table.namespace.clone(),
                table_name: table.table_name.clone(),
            }),
            DeleteOutcome::Unauthorized => Err(TableError::Api {
                status: StatusCode::UNAUTHORIZED,
                body: "invalid API Key".to_string(),
            }),
        }
    }

    async fn create_table(
        &self,
        table: &TableRef,
        schema: &[Column],
        is_private: bool,
    ) -> Result<CreatedTable, TableError> {
        self.record(TableCall::Create {
            table: table.clone(),
            columns: schema.len(),
            is_private,
        });

        if self.fail_create {
            return Err(TableError::Api {
                status: StatusCode::BAD_REQUEST,
                body: "invalid schema".to_string(),
            });
        }

        Ok(CreatedTable {
            namespace: table.namespace.clone(),
            table_name: table.table_name.clone(),
            full_name: format!("dune.{table}"),
            ..CreatedTable::default()
        })
    }

    async fn insert(
        &self,
        table: &TableRef,
        payload: Vec<u8>,
        content_type: ContentType,
    ) -> Result<InsertedRows, TableError> {
        let rows_written = if payload.is_empty() {
            0
        } else {
            payload.split(|byte| *byte == b'\n').count() as u64
        };
        let bytes_written = payload.len() as u64;

        self.record(TableCall::Insert {
            table: table.clone(),
            payload,
            content_type,
        });

        Ok(InsertedRows {
            rows_written,
            bytes_written,
            name: table.table_name.clone(),
        })
    }
}
