//! CLI-specific config helpers.
//!
//! Loads the shared configuration and layers `GlobalOpts` flags on top.

use intercheck_config::Config;
use intercheck_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file + environment, then apply CLI flag overrides.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = intercheck_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref server) = global.server {
        cfg.server.clone_from(server);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout_secs = timeout;
    }
}

/// Build a validated `DashboardConfig` from file, environment, and flags.
pub fn dashboard_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let cfg = effective_config(global)?;
    Ok(intercheck_config::to_dashboard_config(&cfg)?)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::parse_from([
            "intercheck",
            "--server",
            "http://10.1.1.1:5000",
            "--timeout",
            "4",
            "status",
        ]);
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &cli.global);
        assert_eq!(cfg.server, "http://10.1.1.1:5000");
        assert_eq!(cfg.timeout_secs, 4);
        assert_eq!(cfg.status_interval_ms, Config::default().status_interval_ms);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cli = Cli::parse_from(["intercheck", "summary"]);
        let mut cfg = Config {
            server: "http://speedbox:5000".into(),
            ..Config::default()
        };
        if cli.global.server.is_none() {
            apply_overrides(&mut cfg, &cli.global);
            assert_eq!(cfg.server, "http://speedbox:5000");
        }
        assert_eq!(cfg.timeout_secs, 30);
    }
}
