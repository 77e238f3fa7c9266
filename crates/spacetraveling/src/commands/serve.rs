//! `spacetraveling serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use st_config::{CliSettings, Config};
use st_server::{run_server, server_config_from_config};

use super::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover spacetraveling.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Content API endpoint (overrides config).
    #[arg(long, env = "SPACETRAVELING_ENDPOINT")]
    endpoint: Option<String>,

    /// Generate pages on first request only.
    #[arg(long)]
    no_prerender: bool,

    /// Regenerate every page on every request.
    #[arg(long)]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            endpoint: self.endpoint,
            prerender: self.no_prerender.then_some(false),
            cache_enabled: self.no_cache.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Content API: {}", config.require_endpoint()?));
        output.info(&format!(
            "Revalidate after: {}s",
            config.site.revalidate_secs
        ));
        if !config.site.cache {
            output.warning("Cache: disabled (pages regenerate on every request)");
        } else if config.site.prerender {
            output.info("Pre-rendering: enabled");
        } else {
            output.info("Pre-rendering: disabled");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config, site)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Harness::try_parse_from(["serve", "--port", "4000", "--no-cache"])
            .unwrap()
            .serve;
        assert_eq!(args.port, Some(4000));
        assert!(args.no_cache);
        assert!(!args.no_prerender);
    }
}
