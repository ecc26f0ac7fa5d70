use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, SYNC_FAILED};
use crate::error::Result;
use crate::gateway::RemoteGateway;
use crate::store::KeyValueStore;

pub async fn run<S: KeyValueStore, G: RemoteGateway>(
    catalog: &mut Catalog<S>,
    gateway: &G,
    text: &str,
    category: &str,
) -> Result<CmdResult> {
    let quote = catalog.add_quote(text, category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Quote added to {}: {}",
        quote.category, quote.text
    )));

    if gateway.is_configured() {
        if let Err(e) = gateway.create(&quote).await {
            tracing::warn!(id = quote.id, error = %e, "failed to push new quote");
            result.add_message(CmdMessage::warning(format!(
                "{}: quote kept locally ({})",
                SYNC_FAILED, e
            )));
        }
    }

    result.affected_quotes.push(quote);
    Ok(result)
}
