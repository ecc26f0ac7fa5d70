//! # Reconciliation
//!
//! Merges the local quote set with a remotely fetched one.
//!
//! Policy:
//! - The local sequence is copied first, in order. Local entries are never
//!   removed or changed by a merge.
//! - A remote entry is appended iff its `id` is not already in the result.
//!   Local always wins a shared id; remote edits to a known id are dropped.
//!   A remote id repeated within the same fetch keeps its first occurrence.
//! - No field-level merge and no timestamp comparison.
//!
//! `overwritten` is a coarse "something changed" flag: true when local was
//! non-empty and the merged length differs from it. It does not detect real
//! conflicts (a remote edit to a local id leaves it false).

use crate::model::Quote;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    pub merged: Vec<Quote>,
    pub added_from_server: usize,
    pub overwritten: bool,
}

pub fn reconcile(local: &[Quote], remote: &[Quote]) -> MergeResult {
    let mut merged = local.to_vec();
    let mut seen: HashSet<i64> = local.iter().map(|q| q.id).collect();

    let mut added_from_server = 0;
    for quote in remote {
        if seen.insert(quote.id) {
            merged.push(quote.clone());
            added_from_server += 1;
        }
    }

    let overwritten = !local.is_empty() && merged.len() != local.len();

    MergeResult {
        merged,
        added_from_server,
        overwritten,
    }
}

/// Same as [`reconcile`], treating a missing sequence as empty.
pub fn reconcile_opt(local: Option<&[Quote]>, remote: Option<&[Quote]>) -> MergeResult {
    reconcile(local.unwrap_or_default(), remote.unwrap_or_default())
}
