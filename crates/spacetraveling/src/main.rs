//! spacetraveling CLI - blog post pages.
//!
//! Provides commands for:
//! - `serve`: Serve post pages with on-demand generation and revalidation
//! - `build`: Export every post as static HTML
//! - `paths`: List the routes that would be pre-rendered

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, PathsArgs, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// spacetraveling - blog post pages backed by a headless CMS.
#[derive(Parser)]
#[command(name = "spacetraveling", version, about)]
struct Cli {
    /// Log at INFO level (otherwise `RUST_LOG` or WARN).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve post pages.
    Serve(ServeArgs),
    /// Export post pages as static files.
    Build(BuildArgs),
    /// List post routes.
    Paths(PathsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(error::CliError::Server(format!(
                "Failed to create tokio runtime: {e}"
            ))),
        },
        Commands::Build(args) => args.execute(),
        Commands::Paths(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["spacetraveling", "paths", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Paths(_)));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["spacetraveling"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["spacetraveling", "build", "--bogus"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
