//! `intercheck download`

use std::io::{self, Write};

use intercheck_api::LogFormat;
use intercheck_core::{CoreError, Dashboard};

use crate::cli::DownloadArgs;
use crate::error::CliError;

pub async fn handle(dashboard: &Dashboard, args: DownloadArgs) -> Result<(), CliError> {
    let format = LogFormat::from(args.format);
    let bytes = dashboard
        .client()
        .download_log(format)
        .await
        .map_err(CoreError::from)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
