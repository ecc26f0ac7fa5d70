use super::RemoteGateway;
use crate::error::{QuoteError, Result};
use crate::model::Quote;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// A request the gateway received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchAll,
    Create(i64),
    Update(i64),
    Delete(i64),
}

/// In-process remote collection for tests.
///
/// Uses `Cell`/`RefCell` since the gateway is only driven from one thread.
#[derive(Default)]
pub struct MemoryGateway {
    collection: RefCell<Vec<Quote>>,
    calls: RefCell<Vec<GatewayCall>>,
    fail_all: Cell<bool>,
    unresponsive: Cell<bool>,
    failing_ids: RefCell<HashSet<i64>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        let gateway = Self::default();
        *gateway.collection.borrow_mut() = quotes;
        gateway
    }

    /// Make every request fail with a network error.
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.set(fail);
    }

    /// Make `fetch_all` hang after logging the call, like a server that
    /// accepts the connection and never answers.
    pub fn set_unresponsive(&self, stall: bool) {
        self.unresponsive.set(stall);
    }

    /// Make writes for one id fail with a network error.
    pub fn fail_id(&self, id: i64) {
        self.failing_ids.borrow_mut().insert(id);
    }

    pub fn collection(&self) -> Vec<Quote> {
        self.collection.borrow().clone()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GatewayCall) -> Result<()> {
        let id = match &call {
            GatewayCall::FetchAll => None,
            GatewayCall::Create(id) | GatewayCall::Update(id) | GatewayCall::Delete(id) => {
                Some(*id)
            }
        };
        self.calls.borrow_mut().push(call);

        if self.fail_all.get() {
            return Err(QuoteError::Network("simulated outage".to_string()));
        }
        if let Some(id) = id {
            if self.failing_ids.borrow().contains(&id) {
                return Err(QuoteError::Network(format!("simulated failure for {}", id)));
            }
        }
        Ok(())
    }
}

impl RemoteGateway for MemoryGateway {
    async fn fetch_all(&self) -> Result<Vec<Quote>> {
        self.record(GatewayCall::FetchAll)?;
        if self.unresponsive.get() {
            std::future::pending::<()>().await;
        }
        Ok(self.collection())
    }

    async fn create(&self, quote: &Quote) -> Result<()> {
        self.record(GatewayCall::Create(quote.id))?;
        self.collection.borrow_mut().push(quote.clone());
        Ok(())
    }

    async fn update(&self, quote: &Quote) -> Result<()> {
        self.record(GatewayCall::Update(quote.id))?;
        let mut collection = self.collection.borrow_mut();
        match collection.iter_mut().find(|q| q.id == quote.id) {
            Some(existing) => *existing = quote.clone(),
            None => collection.push(quote.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record(GatewayCall::Delete(id))?;
        self.collection.borrow_mut().retain(|q| q.id != id);
        Ok(())
    }
}
