use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

/// Distinct categories in first-seen order. Callers present the
/// [`ALL_CATEGORIES`](crate::model::ALL_CATEGORIES) sentinel ahead of them.
pub fn run<S: KeyValueStore>(catalog: &Catalog<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_categories(catalog.categories()))
}
