//! `intercheck force [--wait]`

use serde_json::json;
use tracing::debug;

use intercheck_core::{Dashboard, ForceOutcome, ForceState};

use crate::cli::{ForceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &Dashboard,
    args: ForceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The guard needs a current status to refuse while a test runs.
    let status = dashboard.poll_status().await;
    if !status.is_online() {
        return Err(super::offline(dashboard));
    }

    match dashboard.force().await {
        ForceOutcome::Forcing => {
            if args.wait {
                wait_for_release(dashboard).await;
            }
            if global.json {
                let body = json!({
                    "forced": true,
                    "finished": args.wait,
                });
                output::print_line(&output::render_json(&body)?);
            }
            Ok(())
        }
        ForceOutcome::Rejected => Err(CliError::ForceRejected),
        ForceOutcome::Refused(reason) => Err(CliError::ForceRefused { reason }),
        ForceOutcome::Failed => Err(super::offline(dashboard)),
    }
}

/// Poll at the accelerated cadence until the forced test is no longer
/// reported as running.
async fn wait_for_release(dashboard: &Dashboard) {
    let interval = dashboard.config().force_poll_interval;
    while dashboard.force_state().await == ForceState::Forcing {
        tokio::time::sleep(interval).await;
        let status = dashboard.poll_status().await;
        debug!(?status, "waiting for forced test");
    }
}
