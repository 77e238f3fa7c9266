//! `spacetraveling build` command implementation.

use std::path::PathBuf;

use clap::Args;
use st_config::{CliSettings, Config};
use st_site::StaticSiteBuilder;

use super::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the generated pages (default: dist/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Content API endpoint (overrides config).
    #[arg(long, env = "SPACETRAVELING_ENDPOINT")]
    endpoint: Option<String>,

    /// Path to configuration file (default: auto-discover spacetraveling.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            endpoint: self.endpoint,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config)?;
        let builder = StaticSiteBuilder::new(site, &config.build_resolved.output_dir);

        output.info(&format!("Content API: {}", config.require_endpoint()?));
        output.info(&format!("Output: {}", builder.output_dir().display()));

        let report = builder.build()?;

        for slug in &report.skipped {
            output.warning(&format!("Skipped post: {slug}"));
        }
        output.success(&format!(
            "Built {} posts to {}",
            report.pages.len(),
            builder.output_dir().display()
        ));
        Ok(())
    }
}
