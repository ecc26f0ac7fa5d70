use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuoteError, Result};
use crate::store::KeyValueStore;

/// Saves `category` as the selected filter and lists its quotes.
pub fn run<S: KeyValueStore>(catalog: &mut Catalog<S>, category: &str) -> Result<CmdResult> {
    let category = category.trim();
    if category.is_empty() {
        return Err(QuoteError::Validation("Category cannot be empty".to_string()));
    }
    catalog.set_selected_category(category)?;

    let listed: Vec<_> = catalog
        .filter(Some(category))
        .into_iter()
        .cloned()
        .collect();
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No quotes available in this category."));
    }
    Ok(result.with_listed_quotes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quote, ALL_CATEGORIES};
    use crate::test_utils::catalog_with;

    #[test]
    fn saves_selection_and_lists() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X"), Quote::new(2, "B", "Y")]);
        let result = run(&mut catalog, "Y").unwrap();
        assert_eq!(result.listed_quotes.len(), 1);
        assert_eq!(catalog.selected_category().unwrap().as_deref(), Some("Y"));

        let all = run(&mut catalog, ALL_CATEGORIES).unwrap();
        assert_eq!(all.listed_quotes.len(), 2);
    }

    #[test]
    fn empty_selection_reports_message() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);
        let result = run(&mut catalog, "Nope").unwrap();
        assert!(result.listed_quotes.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
