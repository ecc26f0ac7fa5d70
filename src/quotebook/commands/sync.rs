use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, SYNC_FAILED};
use crate::error::Result;
use crate::gateway::RemoteGateway;
use crate::store::KeyValueStore;
use crate::sync::{CycleOutcome, Synchronizer};

/// Runs one reconciliation cycle and describes its outcome.
pub async fn run<S: KeyValueStore, G: RemoteGateway>(
    catalog: &mut Catalog<S>,
    synchronizer: &Synchronizer<G>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if !synchronizer.gateway().is_configured() {
        result.add_message(CmdMessage::warning(
            "No remote configured; set remote_url or QUOTEBOOK_REMOTE_URL",
        ));
        return Ok(result);
    }

    let outcome = synchronizer.run_cycle(catalog).await;
    describe(&outcome, &mut result);
    Ok(result)
}

/// Turns a cycle outcome into user-facing messages.
pub fn describe(outcome: &CycleOutcome, result: &mut CmdResult) {
    match outcome {
        CycleOutcome::Skipped => {
            result.add_message(CmdMessage::info("Sync already in progress"));
        }
        CycleOutcome::Failed(e) => {
            result.add_message(CmdMessage::warning(format!("{}: {}", SYNC_FAILED, e)));
        }
        CycleOutcome::Completed(report) => {
            if report.overwritten {
                result.add_message(CmdMessage::info(
                    "Quotes were updated with data from the server",
                ));
            }
            result.add_message(CmdMessage::success(format!(
                "Synced {} quotes ({} new from server)",
                report.total, report.added_from_server
            )));
            if !report.push.failures.is_empty() {
                result.add_message(CmdMessage::warning(format!(
                    "{}: {} quote(s) could not be pushed",
                    SYNC_FAILED,
                    report.push.failures.len()
                )));
            }
        }
    }
}
