use super::{records_to_quotes, RemoteGateway};
use crate::error::{QuoteError, Result};
use crate::model::Quote;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Client for a remote collection with conventional CRUD-over-HTTP semantics.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    /// Collection URL, e.g. "https://example.com/quotes".
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(QuoteError::Config("Remote URL is empty".to_string()));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Write responses only need a success status; bodies are not inspected.
    fn ensure_success(response: Response, action: &str, url: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            tracing::debug!(%status, url, "{} ok", action);
            Ok(())
        } else {
            Err(QuoteError::Network(format!(
                "{} {} returned {}",
                action, url, status
            )))
        }
    }
}

impl RemoteGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Quote>> {
        let response = self.client.get(&self.base_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Network(format!(
                "GET {} returned {}",
                self.base_url, status
            )));
        }

        let values: Vec<Value> = response
            .json()
            .await
            .map_err(|e| QuoteError::Network(format!("Failed to parse collection: {}", e)))?;
        let fetched = values.len();
        let quotes = records_to_quotes(values);
        tracing::debug!(fetched, usable = quotes.len(), url = %self.base_url, "fetched remote collection");
        Ok(quotes)
    }

    async fn create(&self, quote: &Quote) -> Result<()> {
        let response = self
            .client
            .post(&self.base_url)
            .json(quote)
            .send()
            .await?;
        Self::ensure_success(response, "POST", &self.base_url)
    }

    async fn update(&self, quote: &Quote) -> Result<()> {
        let url = self.item_url(quote.id);
        let response = self.client.put(&url).json(quote).send().await?;
        Self::ensure_success(response, "PUT", &url)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.item_url(id);
        let response = self.client.delete(&url).send().await?;
        Self::ensure_success(response, "DELETE", &url)
    }
}
