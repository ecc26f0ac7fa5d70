//! # API Facade
//!
//! The single entry point for every quotebook operation, whatever the UI.
//! It owns the session's [`Catalog`], the session-scoped store and the
//! [`Synchronizer`], and dispatches to `commands/*.rs`.
//!
//! `QuotebookApi<S, G>` is generic over the durable store and the gateway:
//! - Production: `QuotebookApi<FileStore, ConfiguredGateway>`
//! - Testing: `QuotebookApi<InMemoryStore, MemoryGateway>`

use crate::catalog::Catalog;
use crate::commands;
use crate::error::Result;
use crate::gateway::RemoteGateway;
use crate::store::memory::InMemoryStore;
use crate::store::KeyValueStore;
use crate::sync::{CycleOutcome, Synchronizer};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

pub struct QuotebookApi<S: KeyValueStore, G: RemoteGateway> {
    catalog: Catalog<S>,
    session: InMemoryStore,
    synchronizer: Synchronizer<G>,
}

impl<S: KeyValueStore, G: RemoteGateway> QuotebookApi<S, G> {
    /// Loads the catalog from `store` (seeding defaults when empty).
    pub fn new(store: S, synchronizer: Synchronizer<G>) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::load(store)?,
            session: InMemoryStore::new(),
            synchronizer,
        })
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    pub fn session(&self) -> &InMemoryStore {
        &self.session
    }

    pub fn remote_configured(&self) -> bool {
        self.synchronizer.gateway().is_configured()
    }

    pub async fn add_quote(&mut self, text: &str, category: &str) -> Result<commands::CmdResult> {
        commands::add::run(
            &mut self.catalog,
            self.synchronizer.gateway(),
            text,
            category,
        )
        .await
    }

    pub async fn remove_quote(&mut self, id: i64) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.catalog, self.synchronizer.gateway(), id).await
    }

    pub fn show_random(&mut self, category: Option<&str>) -> Result<commands::CmdResult> {
        commands::show::run(&self.catalog, &mut self.session, category)
    }

    pub fn list_quotes(&self, category: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.catalog, category)
    }

    pub fn categories(&self) -> Result<commands::CmdResult> {
        commands::categories::run(&self.catalog)
    }

    pub fn filter_quotes(&mut self, category: &str) -> Result<commands::CmdResult> {
        commands::filter::run(&mut self.catalog, category)
    }

    pub async fn import_quotes(&mut self, path: &Path, merge: bool) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.catalog, self.synchronizer.gateway(), path, merge).await
    }

    pub fn export_quotes(&self, target: ExportTarget) -> Result<commands::CmdResult> {
        commands::export::run(&self.catalog, target)
    }

    pub async fn sync(&mut self) -> Result<commands::CmdResult> {
        commands::sync::run(&mut self.catalog, &self.synchronizer).await
    }

    pub fn status(&self) -> Result<commands::CmdResult> {
        commands::status::run(&self.catalog, self.remote_configured())
    }

    /// Syncs now and every `every` until `shutdown` resolves, showing a fresh
    /// random quote after each cycle.
    pub async fn watch<F, Fut>(&mut self, every: Duration, shutdown: Fut, mut on_cycle: F)
    where
        F: FnMut(commands::CmdResult),
        Fut: Future<Output = ()>,
    {
        let session = &mut self.session;
        self.synchronizer
            .watch(&mut self.catalog, every, shutdown, |catalog, outcome| {
                let mut result = match commands::show::run(catalog, &mut *session, None) {
                    Ok(result) => result,
                    Err(e) => {
                        let mut result = commands::CmdResult::default();
                        result.add_message(CmdMessage::error(e.to_string()));
                        result
                    }
                };
                if !matches!(outcome, CycleOutcome::Skipped) {
                    commands::sync::describe(outcome, &mut result);
                }
                on_cycle(result);
            })
            .await;
    }
}

pub use crate::commands::export::{ExportTarget, DEFAULT_EXPORT_FILE};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, StatusReport};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::{GatewayCall, MemoryGateway};
    use crate::model::Quote;
    use crate::store::LAST_SHOWN_KEY;

    fn api_with(remote: Vec<Quote>) -> QuotebookApi<InMemoryStore, MemoryGateway> {
        QuotebookApi::new(
            InMemoryStore::new(),
            Synchronizer::new(MemoryGateway::with_quotes(remote)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fresh_store_starts_with_defaults() {
        let api = api_with(vec![]);
        assert!(!api.catalog().is_empty());
        assert!(api.remote_configured());
    }

    #[tokio::test]
    async fn add_dispatches_and_pushes() {
        let mut api = api_with(vec![]);
        let before = api.catalog().len();
        let result = api.add_quote("New", "Fresh").await.unwrap();
        assert_eq!(api.catalog().len(), before + 1);
        assert_eq!(
            api.synchronizer.gateway().calls(),
            vec![GatewayCall::Create(result.affected_quotes[0].id)]
        );
    }

    #[tokio::test]
    async fn show_records_last_shown_in_session() {
        let mut api = api_with(vec![]);
        let result = api.show_random(None).unwrap();
        assert_eq!(
            api.session().get(LAST_SHOWN_KEY).unwrap(),
            Some(result.listed_quotes[0].render())
        );
    }

    #[tokio::test]
    async fn sync_merges_remote_quotes() {
        let mut api = api_with(vec![Quote::new(10_000, "Remote", "Server")]);
        api.sync().await.unwrap();
        assert!(api.catalog().get(10_000).is_some());
        assert!(api.status().unwrap().status.unwrap().last_sync.is_some());
    }

    #[tokio::test]
    async fn watch_reports_each_cycle() {
        let mut api = api_with(vec![Quote::new(10_000, "Remote", "Server")]);
        let mut results = Vec::new();
        api.watch(
            Duration::from_secs(3600),
            tokio::time::sleep(Duration::from_millis(50)),
            |result| results.push(result),
        )
        .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].listed_quotes.len(), 1);
        assert!(results[0]
            .messages
            .iter()
            .any(|m| m.content.starts_with("Synced")));
    }
}
