//! `intercheck set` / `intercheck reset`

use serde_json::{Map, Value};

use intercheck_core::{CoreError, Dashboard, RawInput};

use crate::cli::{GlobalOpts, ResetArgs, SetArgs};
use crate::error::CliError;
use crate::output;

pub async fn set(dashboard: &Dashboard, args: SetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let value = dashboard
        .field_changed(&args.field, RawInput::Text(args.value))
        .await
        .map_err(|e| field_error(dashboard, e))?;

    if global.json {
        let mut body = Map::new();
        body.insert(args.field, serde_json::to_value(&value)?);
        output::print_line(&output::render_json(&body)?);
    }
    Ok(())
}

pub async fn reset(
    dashboard: &Dashboard,
    args: ResetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let results = match args.field {
        Some(name) => {
            let result = dashboard.reset_field(&name).await;
            vec![(name, result)]
        }
        None => dashboard.reset_all_settings().await,
    };

    let mut body = Map::new();
    let mut first_error = None;
    for (name, result) in results {
        match result {
            Ok(value) => {
                body.insert(name, serde_json::to_value(&value)?);
            }
            Err(e) => {
                body.insert(name, Value::Null);
                first_error.get_or_insert(e);
            }
        }
    }

    if global.json {
        output::print_line(&output::render_json(&body)?);
    }
    match first_error {
        Some(e) => Err(field_error(dashboard, e)),
        None => Ok(()),
    }
}

/// Attach the configured field names to unknown-field errors.
pub(crate) fn field_error(dashboard: &Dashboard, err: CoreError) -> CliError {
    match err {
        CoreError::UnknownField { name } => CliError::UnknownField {
            name,
            available: dashboard
                .config()
                .fields
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        },
        other => other.into(),
    }
}
