use crate::catalog::Catalog;
use crate::commands::{CmdResult, StatusReport};
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(catalog: &Catalog<S>, remote_configured: bool) -> Result<CmdResult> {
    let status = StatusReport {
        quote_count: catalog.len(),
        categories: catalog.categories(),
        selected_category: catalog.selected_category()?,
        last_sync: catalog.last_sync()?,
        remote_configured,
    };
    Ok(CmdResult {
        status: Some(status),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quote;
    use crate::test_utils::catalog_with;

    #[test]
    fn reports_counts_and_selection() {
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X"), Quote::new(2, "B", "Y")]);
        catalog.set_selected_category("Y").unwrap();

        let status = run(&catalog, false).unwrap().status.unwrap();
        assert_eq!(status.quote_count, 2);
        assert_eq!(status.categories, vec!["X", "Y"]);
        assert_eq!(status.selected_category.as_deref(), Some("Y"));
        assert!(status.last_sync.is_none());
        assert!(!status.remote_configured);
    }
}
