//! `intercheck status`

use serde_json::json;

use intercheck_core::Dashboard;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let status = dashboard.poll_status().await;

    if global.json {
        let body = json!({
            "online": status.is_online(),
            "status": status.iter().collect::<Vec<_>>(),
        });
        output::print_line(&output::render_json(&body)?);
    }

    if status.is_online() {
        Ok(())
    } else {
        Err(super::offline(dashboard))
    }
}
