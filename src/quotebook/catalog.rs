//! # Quote Catalog
//!
//! The in-memory, ordered, authoritative list of quotes for a session. Order is
//! arrival order (local add, import, or merge-in).
//!
//! Every mutation is written through to the injected [`KeyValueStore`] before
//! it becomes visible in memory: if the write fails the catalog is unchanged.
//!
//! Imports are the one place duplicate ids can enter: [`Catalog::import_batch`]
//! appends as-is. Use [`Catalog::import_batch_merged`] to route the batch
//! through [`reconcile`] instead.

use crate::error::{QuoteError, Result};
use crate::model::{
    default_quotes, is_reserved_category, next_id, Quote, QuoteRecord, ALL_CATEGORIES,
};
use crate::reconcile::reconcile;
use crate::store::{KeyValueStore, LAST_SYNC_KEY, QUOTES_KEY, SELECTED_CATEGORY_KEY};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;

/// Outcome of an import.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Quotes that were added, in file order.
    pub imported: Vec<Quote>,
    /// Entries dropped because their id was already present (merged imports only).
    pub skipped_duplicates: usize,
}

pub struct Catalog<S: KeyValueStore> {
    store: S,
    quotes: Vec<Quote>,
}

impl<S: KeyValueStore> Catalog<S> {
    /// Loads the catalog from the store, seeding the built-in defaults when the
    /// store has never held any quotes.
    pub fn load(mut store: S) -> Result<Self> {
        let quotes = match store.get(QUOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => {
                let defaults = default_quotes();
                store.set(QUOTES_KEY, &serde_json::to_string(&defaults)?)?;
                tracing::debug!(count = defaults.len(), "seeded default quotes");
                defaults
            }
        };
        Ok(Self { store, quotes })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::Validation(
                "Please enter both a quote and a category".to_string(),
            ));
        }
        if is_reserved_category(category) {
            return Err(QuoteError::Validation(format!(
                "\"{}\" is reserved and cannot be used as a category",
                ALL_CATEGORIES
            )));
        }

        let quote = Quote::new(next_id(self.max_id())?, text, category);
        let mut next = self.quotes.clone();
        next.push(quote.clone());
        self.commit(next)?;
        Ok(quote)
    }

    /// Removes the quote with `id`. Absent ids are a no-op and return `None`.
    pub fn remove_quote(&mut self, id: i64) -> Result<Option<Quote>> {
        let Some(pos) = self.quotes.iter().position(|q| q.id == id) else {
            return Ok(None);
        };
        let mut next = self.quotes.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Uniform pick over the quotes matching `filter`.
    pub fn random_quote(&self, filter: Option<&str>) -> Option<&Quote> {
        self.random_quote_with(&mut rand::rng(), filter)
    }

    pub fn random_quote_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        filter: Option<&str>,
    ) -> Option<&Quote> {
        self.filter(filter).choose(rng).copied()
    }

    /// Distinct categories in first-seen order. The "all" sentinel is not included.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// Quotes in `category`. `None` or the "all" sentinel selects everything.
    pub fn filter(&self, category: Option<&str>) -> Vec<&Quote> {
        match category {
            None | Some(ALL_CATEGORIES) => self.quotes.iter().collect(),
            Some(cat) => self.quotes.iter().filter(|q| q.category == cat).collect(),
        }
    }

    /// Installs a full replacement, e.g. a reconciled set.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> Result<()> {
        self.commit(quotes)
    }

    /// Appends every entry of a JSON array of quotes. All entries must be valid
    /// or nothing is applied. No dedup against existing ids.
    pub fn import_batch(&mut self, json: &str) -> Result<ImportReport> {
        let imported = self.parse_import(json)?;
        let mut next = self.quotes.clone();
        next.extend(imported.iter().cloned());
        self.commit(next)?;
        Ok(ImportReport {
            imported,
            skipped_duplicates: 0,
        })
    }

    /// Like [`Catalog::import_batch`], but merges by id so existing quotes win.
    pub fn import_batch_merged(&mut self, json: &str) -> Result<ImportReport> {
        let incoming = self.parse_import(json)?;
        let result = reconcile(&self.quotes, &incoming);
        let imported = result.merged[self.quotes.len()..].to_vec();
        let skipped_duplicates = incoming.len() - result.added_from_server;
        self.commit(result.merged)?;
        Ok(ImportReport {
            imported,
            skipped_duplicates,
        })
    }

    /// The catalog as a pretty-printed JSON array, the export file format.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    pub fn selected_category(&self) -> Result<Option<String>> {
        self.store.get(SELECTED_CATEGORY_KEY)
    }

    pub fn set_selected_category(&mut self, category: &str) -> Result<()> {
        self.store.set(SELECTED_CATEGORY_KEY, category)
    }

    pub fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.store.get(LAST_SYNC_KEY)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|e| QuoteError::Store(format!("Invalid last sync time {:?}: {}", raw, e)))
    }

    pub fn record_sync(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.store.set(LAST_SYNC_KEY, &at.to_rfc3339())
    }

    fn max_id(&self) -> Option<i64> {
        self.quotes.iter().map(|q| q.id).max()
    }

    fn commit(&mut self, quotes: Vec<Quote>) -> Result<()> {
        let raw = serde_json::to_string(&quotes)?;
        self.store.set(QUOTES_KEY, &raw)?;
        self.quotes = quotes;
        Ok(())
    }

    fn parse_import(&self, json: &str) -> Result<Vec<Quote>> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| QuoteError::Format(format!("Import is not valid JSON: {}", e)))?;
        let Value::Array(entries) = value else {
            return Err(QuoteError::Format(
                "Import must be a JSON array of quotes".to_string(),
            ));
        };

        let mut problems = Vec::new();
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                problems.push(format!("#{}: not an object", index));
                continue;
            }
            match serde_json::from_value::<QuoteRecord>(entry) {
                Ok(record) => {
                    let missing = record.missing_fields();
                    if !missing.is_empty() {
                        problems.push(format!("#{}: missing {}", index, missing.join(", ")));
                    } else if record.category.as_deref().is_some_and(is_reserved_category) {
                        problems.push(format!("#{}: category {:?} is reserved", index, ALL_CATEGORIES));
                    } else {
                        records.push(record);
                    }
                }
                Err(e) => problems.push(format!("#{}: {}", index, e)),
            }
        }

        if !problems.is_empty() {
            return Err(QuoteError::Validation(format!(
                "Malformed quotes in import: {}",
                problems.join("; ")
            )));
        }

        let mut max_id = self.max_id();
        let mut quotes = Vec::with_capacity(records.len());
        for record in records {
            let id = match record.id {
                Some(id) => id,
                None => next_id(max_id)?,
            };
            if let Some(quote) = record.into_quote(|| id) {
                max_id = Some(max_id.map_or(quote.id, |m| m.max(quote.id)));
                quotes.push(quote);
            }
        }
        Ok(quotes)
    }
}
