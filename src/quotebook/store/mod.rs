//! # Storage Layer
//!
//! Quotes and preferences live behind the [`KeyValueStore`] trait: string keys
//! mapped to string values, synchronous from the caller's point of view.
//!
//! ## Write Semantics
//!
//! A write either lands completely or fails with an error, in which case the
//! prior value is retained. [`fs::FileStore`] gets this by writing a temp file
//! and renaming it into place.
//!
//! ## Keys
//!
//! ```text
//! quotes            JSON array of Quote (durable)
//! selectedCategory  last chosen category filter (durable)
//! lastSync          RFC 3339 time of the last completed sync (durable)
//! lastShownQuote    rendered last-shown quote (session only)
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per key in a data directory.
//! - [`memory::InMemoryStore`]: for tests and for session-scoped keys.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const QUOTES_KEY: &str = "quotes";
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
pub const LAST_SYNC_KEY: &str = "lastSync";
pub const LAST_SHOWN_KEY: &str = "lastShownQuote";

/// Abstract key-value persistence.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never set or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
