//! REST client for one hosted table
//!
//! Speaks the PostgREST dialect the hosted database exposes at
//! `{endpoint}/rest/v1/{table}`:
//!
//! - select: `GET ?select=*`
//! - insert: `POST` with `Prefer: return=representation`
//! - delete: `DELETE ?{column}=eq.{value}` with `Prefer: return=representation`
//!
//! Writes always ask for the affected rows back so callers can tell an empty
//! result from a successful one.

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;

const PREFER: &str = "prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client bound to a single table's rows endpoint
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TableClient {
    http: Client,
    rows_url: Url,
    table_name: String,
}

impl TableClient {
    /// Creates a client for the configured table
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the endpoint is not a valid base
    /// URL or the access key cannot be sent as a header
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let rows_url = rows_url(&config.endpoint, &config.table_name)?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Configuration(format!("invalid access key: {}", e)))?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::Configuration(format!("invalid access key: {}", e)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            rows_url,
            table_name: config.table_name.clone(),
        })
    }

    /// Name of the table this client targets
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fetches every row, unfiltered
    pub async fn select_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        let request = self
            .http
            .get(self.rows_url.clone())
            .query(&[("select", "*")]);

        self.fetch_rows("select", request).await
    }

    /// Inserts one row and returns the rows the store echoes back
    pub async fn insert<B, T>(&self, row: &B) -> Result<Vec<T>, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.rows_url.clone())
            .header(PREFER, RETURN_REPRESENTATION)
            .json(row);

        self.fetch_rows("insert", request).await
    }

    /// Deletes rows where `column` equals `value` and returns the deleted rows
    pub async fn delete_eq<T: DeserializeOwned>(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>, StoreError> {
        let filter = format!("eq.{}", value);
        let request = self
            .http
            .delete(self.rows_url.clone())
            .header(PREFER, RETURN_REPRESENTATION)
            .query(&[(column, filter.as_str())]);

        self.fetch_rows("delete", request).await
    }

    /// Reads at most one row of one column to confirm the table is reachable
    pub async fn ping(&self, column: &str) -> Result<(), StoreError> {
        let request = self
            .http
            .get(self.rows_url.clone())
            .query(&[("select", column), ("limit", "1")]);

        self.fetch_rows::<serde_json::Value>("ping", request).await?;
        Ok(())
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        let started = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|source| StoreError::Transport { operation, source })?;

        let status = response.status();
        debug!(
            table = %self.table_name,
            operation,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Table API call"
        );

        if !status.is_success() {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::from_status(operation, status, retry_after_secs, &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| StoreError::Transport { operation, source })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&body).map_err(|e| StoreError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

/// Builds `{endpoint}/rest/v1/{table}`
fn rows_url(endpoint: &str, table_name: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| StoreError::Configuration(format!("invalid endpoint '{}': {}", endpoint, e)))?;

    url.path_segments_mut()
        .map_err(|_| StoreError::Configuration(format!("endpoint '{}' cannot be a base URL", endpoint)))?
        .pop_if_empty()
        .extend(["rest", "v1", table_name]);

    Ok(url)
}
