use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, SYNC_FAILED};
use crate::error::Result;
use crate::gateway::RemoteGateway;
use crate::store::KeyValueStore;

pub async fn run<S: KeyValueStore, G: RemoteGateway>(
    catalog: &mut Catalog<S>,
    gateway: &G,
    id: i64,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(removed) = catalog.remove_quote(id)? else {
        result.add_message(CmdMessage::info(format!("No quote with id {}", id)));
        return Ok(result);
    };

    result.add_message(CmdMessage::success(format!(
        "Quote removed: {}",
        removed.text
    )));

    if gateway.is_configured() {
        if let Err(e) = gateway.delete(id).await {
            tracing::warn!(id, error = %e, "failed to push removal");
            result.add_message(CmdMessage::warning(format!("{} ({})", SYNC_FAILED, e)));
        }
    }

    result.affected_quotes.push(removed);
    Ok(result)
}
