//! `intercheck summary`

use serde_json::json;

use intercheck_core::Dashboard;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = dashboard.refresh_summary().await?;

    if global.json {
        let body = json!({
            "interval": snapshot.interval_label(),
            "stats": snapshot.stats(),
        });
        output::print_line(&output::render_json(&body)?);
    }
    Ok(())
}
