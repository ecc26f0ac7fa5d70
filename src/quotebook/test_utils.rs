use crate::catalog::Catalog;
use crate::model::Quote;
use crate::store::memory::InMemoryStore;
use crate::store::{KeyValueStore, QUOTES_KEY};

/// A catalog over an in-memory store holding exactly `quotes`.
pub fn catalog_with(quotes: Vec<Quote>) -> Catalog<InMemoryStore> {
    let mut store = InMemoryStore::new();
    let raw = serde_json::to_string(&quotes).expect("quotes serialize");
    store.set(QUOTES_KEY, &raw).expect("in-memory write");
    Catalog::load(store).expect("catalog loads")
}

/// A catalog with no quotes (not even the defaults).
pub fn empty_catalog() -> Catalog<InMemoryStore> {
    catalog_with(Vec::new())
}
