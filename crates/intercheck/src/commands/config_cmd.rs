//! Config subcommand handlers.

use intercheck_config::{self as config_file, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_line(&config_file::config_path().display().to_string());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::effective_config(global)?;
            let rendered = if global.json {
                output::render_json(&cfg)?
            } else {
                toml::to_string_pretty(&cfg)?
            };
            output::print_line(rendered.trim_end());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config_file::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            config::apply_overrides(&mut cfg, global);
            // Refuse to write a file that would not load.
            config_file::to_dashboard_config(&cfg)?;

            let written = config_file::save_config(&cfg)?;
            eprintln!("Wrote {}", written.display());
            Ok(())
        }
    }
}
