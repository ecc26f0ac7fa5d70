use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{KeyValueStore, LAST_SHOWN_KEY};

/// Picks a random quote. Without an explicit filter the saved category is used.
/// The rendered quote is remembered in the session store.
pub fn run<S: KeyValueStore, K: KeyValueStore>(
    catalog: &Catalog<S>,
    session: &mut K,
    category: Option<&str>,
) -> Result<CmdResult> {
    let saved = match category {
        Some(_) => None,
        None => catalog.selected_category()?,
    };
    let filter = category.or(saved.as_deref());

    let mut result = CmdResult::default();
    match catalog.random_quote(filter) {
        Some(quote) => {
            session.set(LAST_SHOWN_KEY, &quote.render())?;
            result.listed_quotes.push(quote.clone());
        }
        None if catalog.is_empty() => {
            result.add_message(CmdMessage::info("No quotes available."));
        }
        None => {
            result.add_message(CmdMessage::info("No quotes available in this category."));
        }
    }
    Ok(result)
}
