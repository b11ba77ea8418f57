//! `intercheck watch`: the live dashboard.
//!
//! Starts the engine loops and reads one command per line from stdin
//! until `quit` or Ctrl-C. When stdin closes the dashboard keeps running.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use intercheck_core::{CoreError, Dashboard, ForceOutcome, RawInput};

use crate::error::CliError;
use crate::output;

const HELP: &str = "commands: force | refresh | status | set <field> <value> | \
                    default <field> | reset | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum WatchCommand {
    Force,
    Refresh,
    Status,
    Set { field: String, value: String },
    Default { field: String },
    Reset,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
fn parse_command(line: &str) -> Result<Option<WatchCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let cmd = match verb {
        "force" | "f" => WatchCommand::Force,
        "refresh" | "r" => WatchCommand::Refresh,
        "status" | "s" => WatchCommand::Status,
        "set" => {
            let field = words.next().ok_or("usage: set <field> <value>")?;
            // Values may contain spaces.
            let value = words.collect::<Vec<_>>().join(" ");
            if value.is_empty() {
                return Err("usage: set <field> <value>".into());
            }
            WatchCommand::Set {
                field: field.to_owned(),
                value,
            }
        }
        "default" => {
            let field = words.next().ok_or("usage: default <field>")?;
            WatchCommand::Default {
                field: field.to_owned(),
            }
        }
        "reset" => WatchCommand::Reset,
        "help" | "?" => WatchCommand::Help,
        "quit" | "exit" | "q" => WatchCommand::Quit,
        other => return Err(format!("unknown command '{other}' ({HELP})")),
    };
    Ok(Some(cmd))
}

pub async fn handle(dashboard: &Dashboard) -> Result<(), CliError> {
    dashboard.start().await;
    output::print_line(HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            line = lines.next_line(), if stdin_open => match line? {
                None => {
                    debug!("stdin closed, watching until interrupted");
                    stdin_open = false;
                }
                Some(line) => match parse_command(&line) {
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(cmd)) => run_command(dashboard, cmd),
                    Ok(None) => {}
                    Err(msg) => eprintln!("{msg}"),
                },
            },
        }
    }

    dashboard.shutdown().await;
    Ok(())
}

/// Run a command without blocking the input loop. Results are rendered by
/// the console adapter; only what it cannot show is printed here.
fn run_command(dashboard: &Dashboard, cmd: WatchCommand) {
    match cmd {
        WatchCommand::Refresh => dashboard.request_summary_refresh(),
        WatchCommand::Status => dashboard.request_status_poll(),
        WatchCommand::Help => output::print_line(HELP),
        WatchCommand::Quit => {}
        WatchCommand::Force => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                if let ForceOutcome::Refused(reason) = dashboard.force().await {
                    eprintln!("force not sent: {reason}");
                }
            });
        }
        WatchCommand::Set { field, value } => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                report_unknown(dashboard.field_changed(&field, RawInput::Text(value)).await);
            });
        }
        WatchCommand::Default { field } => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                report_unknown(dashboard.reset_field(&field).await);
            });
        }
        WatchCommand::Reset => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                dashboard.reset_all_settings().await;
            });
        }
    }
}

fn report_unknown<T>(result: Result<T, CoreError>) {
    if let Err(e @ CoreError::UnknownField { .. }) = result {
        eprintln!("{e}");
    }
}
