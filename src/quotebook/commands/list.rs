use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(catalog: &Catalog<S>, category: Option<&str>) -> Result<CmdResult> {
    let listed = catalog.filter(category).into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_quotes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quote, ALL_CATEGORIES};
    use crate::test_utils::catalog_with;

    #[test]
    fn lists_in_catalog_order() {
        let catalog = catalog_with(vec![
            Quote::new(2, "B", "Y"),
            Quote::new(1, "A", "X"),
            Quote::new(3, "C", "Y"),
        ]);
        let all = run(&catalog, None).unwrap();
        let ids: Vec<i64> = all.listed_quotes.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        assert_eq!(run(&catalog, Some("Y")).unwrap().listed_quotes.len(), 2);
        assert_eq!(run(&catalog, Some(ALL_CATEGORIES)).unwrap().listed_quotes.len(), 3);
    }
}
