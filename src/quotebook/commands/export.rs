use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuoteError, Result};
use crate::store::KeyValueStore;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

#[derive(Debug, Clone)]
pub enum ExportTarget {
    File(PathBuf),
    /// Return the JSON in the result instead of writing it.
    Inline,
}

impl Default for ExportTarget {
    fn default() -> Self {
        ExportTarget::File(PathBuf::from(DEFAULT_EXPORT_FILE))
    }
}

pub fn run<S: KeyValueStore>(catalog: &Catalog<S>, target: ExportTarget) -> Result<CmdResult> {
    let json = catalog.export_json()?;
    let mut result = CmdResult::default();

    match target {
        ExportTarget::Inline => {
            result.exported = Some(json);
        }
        ExportTarget::File(path) => {
            fs::write(&path, json).map_err(QuoteError::Io)?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} quotes to {}",
                catalog.len(),
                path.display()
            )));
            result.output_path = Some(path);
        }
    }
    Ok(result)
}
