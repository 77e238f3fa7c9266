//! `spacetraveling paths` command implementation.

use std::path::PathBuf;

use clap::Args;
use st_config::{CliSettings, Config};

use super::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    /// Content API endpoint (overrides config).
    #[arg(long, env = "SPACETRAVELING_ENDPOINT")]
    endpoint: Option<String>,

    /// Path to configuration file (default: auto-discover spacetraveling.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl PathsArgs {
    /// Print one route per line on stdout.
    #[allow(clippy::print_stdout)]
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            endpoint: self.endpoint,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let paths = site_from_config(&config)?.static_paths()?;

        if paths.is_empty() {
            output.warning("No posts found");
            return Ok(());
        }
        for route in paths.routes() {
            println!("{route}");
        }
        output.success(&format!("{} routes", paths.len()));
        Ok(())
    }
}
