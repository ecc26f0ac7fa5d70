//! # Reconciliation Cycles
//!
//! One cycle is: fetch the remote collection, [`reconcile`] it with the
//! catalog, install and persist the merged set, then push every quote back with
//! `update`, one at a time in catalog order.
//!
//! ## Failure Model
//!
//! - A failed fetch ends the cycle before anything local is touched.
//! - A failed store write ends the cycle; the catalog keeps its prior state.
//! - A failed push is logged and counted; the remaining quotes are still pushed.
//!
//! ## Overlap
//!
//! At most one cycle runs at a time. [`Synchronizer::run_cycle`] claims an
//! in-flight flag and returns [`CycleOutcome::Skipped`] if another cycle holds
//! it. In watch mode missed timer ticks are skipped rather than queued.
//!
//! ## Shutdown
//!
//! [`Synchronizer::watch`] races its shutdown future against the running cycle
//! as well as the timer, so a stalled request cannot hold the loop open. An
//! interrupted cycle is dropped at its current await point: local state stays
//! as of the last successful write and the in-flight flag is released.

use crate::catalog::Catalog;
use crate::error::QuoteError;
use crate::gateway::RemoteGateway;
use crate::model::Quote;
use crate::reconcile::reconcile;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Holds the in-flight flag for the duration of a cycle.
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct PushReport {
    pub pushed: usize,
    /// Ids whose push failed, with the error text.
    pub failures: Vec<(i64, String)>,
}

#[derive(Debug)]
pub struct SyncReport {
    pub added_from_server: usize,
    pub overwritten: bool,
    pub total: usize,
    pub push: PushReport,
    pub synced_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Another cycle was already running.
    Skipped,
    /// The cycle ended early. Local state is as of the last successful write.
    Failed(QuoteError),
    Completed(SyncReport),
}

pub struct Synchronizer<G: RemoteGateway> {
    gateway: G,
    in_flight: Arc<AtomicBool>,
    push_on_sync: bool,
}

impl<G: RemoteGateway> Synchronizer<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: Arc::new(AtomicBool::new(false)),
            push_on_sync: true,
        }
    }

    pub fn with_push_on_sync(mut self, push: bool) -> Self {
        self.push_on_sync = push;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the in-flight flag, or `None` if a cycle is already running.
    pub fn try_begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                flag: Arc::clone(&self.in_flight),
            })
    }

    pub async fn run_cycle<S: KeyValueStore>(&self, catalog: &mut Catalog<S>) -> CycleOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("sync already in flight, skipping");
            return CycleOutcome::Skipped;
        };

        let remote = match self.gateway.fetch_all().await {
            Ok(remote) => remote,
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed, no remote data this cycle");
                return CycleOutcome::Failed(e);
            }
        };

        let result = reconcile(catalog.quotes(), &remote);
        if let Err(e) = catalog.replace_all(result.merged) {
            tracing::warn!(error = %e, "could not persist merged quotes");
            return CycleOutcome::Failed(e);
        }

        let push = if self.push_on_sync {
            self.push_all(catalog.quotes()).await
        } else {
            PushReport::default()
        };

        let synced_at = Utc::now();
        if let Err(e) = catalog.record_sync(synced_at) {
            tracing::warn!(error = %e, "could not record sync time");
        }

        tracing::info!(
            added = result.added_from_server,
            overwritten = result.overwritten,
            total = catalog.len(),
            pushed = push.pushed,
            push_failures = push.failures.len(),
            "sync cycle complete"
        );

        CycleOutcome::Completed(SyncReport {
            added_from_server: result.added_from_server,
            overwritten: result.overwritten,
            total: catalog.len(),
            push,
            synced_at,
        })
    }

    /// Pushes each quote with `update`, sequentially. Failures do not stop the loop.
    pub async fn push_all(&self, quotes: &[Quote]) -> PushReport {
        let mut report = PushReport::default();
        for quote in quotes {
            match self.gateway.update(quote).await {
                Ok(()) => report.pushed += 1,
                Err(e) => {
                    tracing::warn!(id = quote.id, error = %e, "failed to push quote");
                    report.failures.push((quote.id, e.to_string()));
                }
            }
        }
        report
    }

    /// Runs a cycle immediately and then every `every` until `shutdown`
    /// resolves, even mid-cycle. `on_cycle` sees the catalog after each
    /// completed cycle.
    pub async fn watch<S, F, Fut>(
        &self,
        catalog: &mut Catalog<S>,
        every: Duration,
        shutdown: Fut,
        mut on_cycle: F,
    ) where
        S: KeyValueStore,
        F: FnMut(&Catalog<S>, &CycleOutcome),
        Fut: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("watch stopped");
                    break;
                }
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = &mut shutdown => {
                            tracing::info!("watch stopped during a cycle");
                            break;
                        }
                        outcome = self.run_cycle(catalog) => on_cycle(catalog, &outcome),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::{GatewayCall, MemoryGateway};
    use crate::store::QUOTES_KEY;
    use crate::test_utils::{catalog_with, empty_catalog};

    fn completed(outcome: CycleOutcome) -> SyncReport {
        match outcome {
            CycleOutcome::Completed(report) => report,
            other => panic!("expected completed cycle, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cycle_merges_persists_and_pushes_in_order() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let gateway =
            MemoryGateway::with_quotes(vec![Quote::new(1, "B", "X"), Quote::new(2, "C", "Y")]);
        let sync = Synchronizer::new(gateway);

        let report = completed(sync.run_cycle(&mut catalog).await);
        assert_eq!(report.added_from_server, 1);
        assert!(report.overwritten);
        assert_eq!(report.total, 2);
        assert_eq!(report.push.pushed, 2);

        assert_eq!(catalog.get(1).unwrap().text, "A");
        assert_eq!(catalog.get(2).unwrap().text, "C");
        let stored: Vec<Quote> =
            serde_json::from_str(&catalog.store().get(QUOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(catalog.last_sync().unwrap(), Some(report.synced_at));

        assert_eq!(
            sync.gateway().calls(),
            vec![
                GatewayCall::FetchAll,
                GatewayCall::Update(1),
                GatewayCall::Update(2)
            ]
        );
        // Local wins, and the push carried the local text to the remote
        assert_eq!(sync.gateway().collection()[0].text, "A");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_untouched() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let gateway = MemoryGateway::with_quotes(vec![Quote::new(2, "C", "Y")]);
        gateway.set_fail_all(true);
        let sync = Synchronizer::new(gateway);

        let outcome = sync.run_cycle(&mut catalog).await;
        assert!(matches!(outcome, CycleOutcome::Failed(QuoteError::Network(_))));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.last_sync().unwrap(), None);
        assert!(!sync.is_in_flight());
    }

    #[tokio::test]
    async fn test_push_failure_continues_with_remaining_items() {
        let mut catalog = catalog_with(vec![
            Quote::new(1, "A", "X"),
            Quote::new(2, "B", "X"),
            Quote::new(3, "C", "X"),
        ]);
        let gateway = MemoryGateway::new();
        gateway.fail_id(2);
        let sync = Synchronizer::new(gateway);

        let report = completed(sync.run_cycle(&mut catalog).await);
        assert_eq!(report.push.pushed, 2);
        assert_eq!(report.push.failures.len(), 1);
        assert_eq!(report.push.failures[0].0, 2);
        assert!(sync.gateway().calls().contains(&GatewayCall::Update(3)));
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_catalog() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let sync = Synchronizer::new(MemoryGateway::with_quotes(vec![Quote::new(2, "C", "Y")]));

        catalog.store().set_simulate_write_error(true);
        let outcome = sync.run_cycle(&mut catalog).await;
        assert!(matches!(outcome, CycleOutcome::Failed(QuoteError::Store(_))));
        assert_eq!(catalog.len(), 1);
        // Nothing was pushed after the failed write
        assert_eq!(sync.gateway().calls(), vec![GatewayCall::FetchAll]);
    }

    #[tokio::test]
    async fn test_overlapping_cycle_is_skipped() {
        let mut catalog = empty_catalog();
        let sync = Synchronizer::new(MemoryGateway::with_quotes(vec![Quote::new(2, "C", "Y")]));

        let guard = sync.try_begin().unwrap();
        assert!(sync.try_begin().is_none());
        assert!(matches!(
            sync.run_cycle(&mut catalog).await,
            CycleOutcome::Skipped
        ));
        assert!(sync.gateway().calls().is_empty());

        drop(guard);
        assert!(!sync.is_in_flight());
        completed(sync.run_cycle(&mut catalog).await);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_push_can_be_disabled() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let sync = Synchronizer::new(MemoryGateway::new()).with_push_on_sync(false);

        let report = completed(sync.run_cycle(&mut catalog).await);
        assert_eq!(report.push.pushed, 0);
        assert_eq!(sync.gateway().calls(), vec![GatewayCall::FetchAll]);
    }

    #[tokio::test]
    async fn test_repeated_cycles_are_idempotent() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let sync = Synchronizer::new(MemoryGateway::with_quotes(vec![Quote::new(2, "C", "Y")]));

        completed(sync.run_cycle(&mut catalog).await);
        let second = completed(sync.run_cycle(&mut catalog).await);
        assert_eq!(second.added_from_server, 0);
        assert!(!second.overwritten);
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_watch_runs_first_cycle_immediately_and_stops() {
        let mut catalog = empty_catalog();
        let sync = Synchronizer::new(MemoryGateway::with_quotes(vec![Quote::new(2, "C", "Y")]));

        let mut cycles = 0;
        sync.watch(
            &mut catalog,
            Duration::from_secs(3600),
            tokio::time::sleep(Duration::from_millis(50)),
            |_, outcome| {
                assert!(matches!(outcome, CycleOutcome::Completed(_)));
                cycles += 1;
            },
        )
        .await;

        assert_eq!(cycles, 1);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_watch_shutdown_interrupts_stalled_cycle() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let gateway = MemoryGateway::with_quotes(vec![Quote::new(2, "B", "Y")]);
        gateway.set_unresponsive(true);
        let sync = Synchronizer::new(gateway);

        let mut cycles = 0;
        let stopped = tokio::time::timeout(
            Duration::from_secs(5),
            sync.watch(
                &mut catalog,
                Duration::from_secs(3600),
                tokio::time::sleep(Duration::from_millis(50)),
                |_, _| cycles += 1,
            ),
        )
        .await;

        assert!(stopped.is_ok());
        assert_eq!(cycles, 0);
        assert!(!sync.is_in_flight());
        assert_eq!(sync.gateway().calls(), vec![GatewayCall::FetchAll]);
        let ids: Vec<i64> = catalog.quotes().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
