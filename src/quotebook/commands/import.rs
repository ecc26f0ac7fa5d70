use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, SYNC_FAILED};
use crate::error::{QuoteError, Result};
use crate::gateway::RemoteGateway;
use crate::store::KeyValueStore;
use std::fs;
use std::path::Path;

/// Imports a JSON file of quotes. The file is applied entirely or not at all.
///
/// With `merge`, quotes whose id is already in the catalog are skipped;
/// otherwise every entry is appended as-is.
pub async fn run<S: KeyValueStore, G: RemoteGateway>(
    catalog: &mut Catalog<S>,
    gateway: &G,
    path: &Path,
    merge: bool,
) -> Result<CmdResult> {
    let raw = fs::read_to_string(path).map_err(QuoteError::Io)?;
    let report = if merge {
        catalog.import_batch_merged(&raw)?
    } else {
        catalog.import_batch(&raw)?
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Quotes imported successfully: {}",
        report.imported.len()
    )));
    if report.skipped_duplicates > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} already present",
            report.skipped_duplicates
        )));
    }

    if gateway.is_configured() {
        let mut failed = 0;
        for quote in &report.imported {
            if let Err(e) = gateway.create(quote).await {
                tracing::warn!(id = quote.id, error = %e, "failed to push imported quote");
                failed += 1;
            }
        }
        if failed > 0 {
            result.add_message(CmdMessage::warning(format!(
                "{}: {} imported quote(s) kept locally only",
                SYNC_FAILED, failed
            )));
        }
    }

    Ok(result.with_affected_quotes(report.imported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::gateway::OfflineGateway;
    use crate::model::Quote;
    use crate::test_utils::{catalog_with, empty_catalog};

    fn write_file(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("quotes.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn imports_file_and_pushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            r#"[{"text": "A", "category": "X"}, {"text": "B", "category": "Y"}]"#,
        );
        let mut catalog = empty_catalog();
        let gateway = MemoryGateway::new();

        let result = run(&mut catalog, &gateway, &path, false).await.unwrap();
        assert_eq!(result.affected_quotes.len(), 2);
        assert_eq!(catalog.len(), 2);
        assert_eq!(gateway.collection().len(), 2);
    }

    #[tokio::test]
    async fn missing_category_aborts_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, r#"[{"text": "Z"}]"#);
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);

        let err = run(&mut catalog, &OfflineGateway, &path, false)
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn merge_skips_existing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            r#"[{"id": 1, "text": "other", "category": "X"}, {"id": 5, "text": "new", "category": "X"}]"#,
        );
        let mut catalog = catalog_with(vec![Quote::new(1, "A", "X")]);

        let result = run(&mut catalog, &OfflineGateway, &path, true).await.unwrap();
        assert_eq!(result.affected_quotes.len(), 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().text, "A");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let mut catalog = empty_catalog();
        let err = run(&mut catalog, &OfflineGateway, Path::new("/nonexistent/q.json"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Io(_)));
    }
}
