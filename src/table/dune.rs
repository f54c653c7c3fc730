//! Client for the Dune table upload API.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::*;

use super::{Column, ContentType, CreatedTable, InsertedRows, TableRef, TableStore};
use crate::error::TableError;

const API_KEY_HEADER: &str = "X-DUNE-API-KEY";

/// HTTP client for the Dune table endpoints, authenticated with an API key.
pub struct DuneClient {
    base_url: String,
    api_key: String,
    http: Client,
}

#[derive(Serialize)]
struct CreateTableBody<'a> {
    namespace: &'a str,
    table_name: &'a str,
    schema: &'a [Column],
    is_private: bool,
}

impl DuneClient {
    pub fn new(base_url: &str, api_key: String, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    fn table_url(&self, table: &TableRef) -> String {
        self.api_url(&format!(
            "/table/{}/{}",
            table.namespace, table.table_name
        ))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    fn delete_request(&self, table: &TableRef) -> RequestBuilder {
        self.authorized(self.http.delete(self.table_url(table)))
    }

    fn create_request(
        &self,
        table: &TableRef,
        schema: &[Column],
        is_private: bool,
    ) -> RequestBuilder {
        let body = CreateTableBody {
            namespace: &table.namespace,
            table_name: &table.table_name,
            schema,
            is_private,
        };

        self.authorized(self.http.post(self.api_url("/table/create")).json(&body))
    }

    fn insert_request(
        &self,
        table: &TableRef,
        payload: Vec<u8>,
        content_type: ContentType,
    ) -> RequestBuilder {
        let request = self
            .http
            .post(format!("{}/insert", self.table_url(table)))
            .header(CONTENT_TYPE, content_type.mime())
            .body(payload);

        self.authorized(request)
    }

    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, TableError> {
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TableError::Api { status, body })
    }
}

impl TableStore for DuneClient {
    async fn delete_table(&self, table: &TableRef) -> Result<(), TableError> {
        debug!("Deleting table {table}");

        match self.send(self.delete_request(table)).await {
            Ok(_) => Ok(()),
            Err(TableError::Api { status, body })
                if is_missing_table(status, &body) =>
            {
                Err(TableError::NotFound {
                    namespace: table.namespace.clone(),
                    table_name: table.table_name.clone(),
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn create_table(
        &self,
        table: &TableRef,
        schema: &[Column],
        is_private: bool,
    ) -> Result<CreatedTable, TableError> {
        debug!("Creating table {table} with {} columns", schema.len());

        let request = self.create_request(table, schema, is_private);
        Ok(self.send(request).await?.json().await?)
    }

    async fn insert(
        &self,
        table: &TableRef,
        payload: Vec<u8>,
        content_type: ContentType,
    ) -> Result<InsertedRows, TableError> {
        debug!("Inserting {} bytes into table {table}", payload.len());

        let request = self.insert_request(table, payload, content_type);
        Ok(self.send(request).await?.json().await?)
    }
}

/// Whether a failed delete means the table was not there in the first place.
///
/// Only a 404, or a 400 whose message says the table is missing, qualifies.
fn is_missing_table(status: StatusCode, body: &str) -> bool {
    match status {
        StatusCode::NOT_FOUND => true,
        StatusCode::BAD_REQUEST => {
            let body = body.to_lowercase();
            body.contains("does not exist") || body.contains("not found")
        }
        _ => false,
    }
}
