//! # Remote Gateway
//!
//! The boundary to the remote quote collection. It owns nothing: every call is
//! a pass-through request with a success/failure answer.
//!
//! Failures are always [`QuoteError::Network`]. Callers treat a failed fetch
//! as "no remote data this cycle" and a failed write as a warning; neither may
//! touch local state.
//!
//! ## Implementations
//!
//! - [`http::HttpGateway`]: CRUD over HTTP (`GET`/`POST` on the collection,
//!   `PUT`/`DELETE` on `/{id}`).
//! - [`memory::MemoryGateway`]: in-process collection with failure injection,
//!   for tests.
//! - [`OfflineGateway`]: stands in when no remote is configured.

use crate::error::{QuoteError, Result};
use crate::model::{is_reserved_category, Quote, QuoteRecord};
use serde_json::Value;

pub mod http;
pub mod memory;

/// Operations the core consumes from the remote collection.
///
/// The futures are not required to be `Send`: everything runs on one
/// cooperative thread.
#[allow(async_fn_in_trait)]
pub trait RemoteGateway {
    /// Fetch the whole collection.
    async fn fetch_all(&self) -> Result<Vec<Quote>>;

    /// Create a new item.
    async fn create(&self, quote: &Quote) -> Result<()>;

    /// Update the item with `quote.id`.
    async fn update(&self, quote: &Quote) -> Result<()>;

    /// Delete the item with `id`.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Whether a remote is actually behind this gateway. Opportunistic pushes
    /// are skipped silently when it is not.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Gateway used when no remote URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGateway;

impl OfflineGateway {
    fn unavailable<T>() -> Result<T> {
        Err(QuoteError::Network("no remote configured".to_string()))
    }
}

impl RemoteGateway for OfflineGateway {
    async fn fetch_all(&self) -> Result<Vec<Quote>> {
        Self::unavailable()
    }

    async fn create(&self, _quote: &Quote) -> Result<()> {
        Self::unavailable()
    }

    async fn update(&self, _quote: &Quote) -> Result<()> {
        Self::unavailable()
    }

    async fn delete(&self, _id: i64) -> Result<()> {
        Self::unavailable()
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// The gateway chosen from configuration at startup.
pub enum ConfiguredGateway {
    Http(http::HttpGateway),
    Offline(OfflineGateway),
}

impl RemoteGateway for ConfiguredGateway {
    async fn fetch_all(&self) -> Result<Vec<Quote>> {
        match self {
            ConfiguredGateway::Http(g) => g.fetch_all().await,
            ConfiguredGateway::Offline(g) => g.fetch_all().await,
        }
    }

    async fn create(&self, quote: &Quote) -> Result<()> {
        match self {
            ConfiguredGateway::Http(g) => g.create(quote).await,
            ConfiguredGateway::Offline(g) => g.create(quote).await,
        }
    }

    async fn update(&self, quote: &Quote) -> Result<()> {
        match self {
            ConfiguredGateway::Http(g) => g.update(quote).await,
            ConfiguredGateway::Offline(g) => g.update(quote).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self {
            ConfiguredGateway::Http(g) => g.delete(id).await,
            ConfiguredGateway::Offline(g) => g.delete(id).await,
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            ConfiguredGateway::Http(g) => g.is_configured(),
            ConfiguredGateway::Offline(g) => g.is_configured(),
        }
    }
}

/// Turns a fetched collection into quotes. Entries without an id, text or
/// category cannot be quotes and are skipped with a warning.
pub fn records_to_quotes(values: Vec<Value>) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let record = match serde_json::from_value::<QuoteRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable remote record");
                continue;
            }
        };
        let Some(id) = record.id else {
            tracing::warn!(index, "skipping remote record without id");
            continue;
        };
        let missing = record.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(index, id, missing = ?missing, "skipping incomplete remote record");
            continue;
        }
        if record.category.as_deref().is_some_and(is_reserved_category) {
            tracing::warn!(index, id, "skipping remote record with reserved category");
            continue;
        }
        if let Some(quote) = record.into_quote(|| id) {
            quotes.push(quote);
        }
    }
    quotes
}
