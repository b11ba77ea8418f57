//! Command dispatch: bridges CLI args -> dashboard operations -> output.

pub mod config_cmd;
pub mod download;
pub mod force;
pub mod settings;
pub mod status;
pub mod summary;
pub mod watch;

use intercheck_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Watch => watch::handle(dashboard).await,
        Command::Status => status::handle(dashboard, global).await,
        Command::Force(args) => force::handle(dashboard, args, global).await,
        Command::Summary => summary::handle(dashboard, global).await,
        Command::Set(args) => settings::set(dashboard, args, global).await,
        Command::Reset(args) => settings::reset(dashboard, args, global).await,
        Command::Download(args) => download::handle(dashboard, args).await,
        // Config and Completions are handled before a dashboard exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// The error for a server that answered nothing usable.
pub(crate) fn offline(dashboard: &Dashboard) -> CliError {
    CliError::ConnectionFailed {
        url: dashboard.config().url.to_string(),
        reason: "no status received".into(),
    }
}
