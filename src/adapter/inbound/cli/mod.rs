//! CLI module graph and command dispatch.

pub mod command;
pub mod decode;
pub mod migrate;
pub mod output;
pub mod pending;
pub mod reconcile;
pub mod submit;

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, Commands};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Exit code for a batch declined by the risk gate.
const EXIT_RISK_REJECTED: u8 = 2;

/// Load the configuration named on the command line.
///
/// Without `--config`, `config.toml` is read when it exists and defaults
/// apply otherwise.
///
/// # Errors
/// Returns an error if an explicitly named file is missing or invalid.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG),
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Execute a parsed command line.
///
/// # Errors
/// Returns the first error raised by the command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    output::configure(output::Mode::from_flags(cli.json, cli.quiet));

    if let Commands::Decode(args) = &cli.command {
        decode::execute(&args.statuses)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(cli.config.as_deref())?;
    config.init_logging();

    match &cli.command {
        Commands::Submit(args) => {
            if submit::execute(&config, args).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_RISK_REJECTED))
            }
        }
        Commands::Pending => pending::execute(&config).await.map(|()| ExitCode::SUCCESS),
        Commands::Reconcile(args) => reconcile::execute(&config, &args.file)
            .await
            .map(|()| ExitCode::SUCCESS),
        Commands::Migrate => migrate::execute(&config).map(|()| ExitCode::SUCCESS),
        Commands::Decode(_) => Ok(ExitCode::SUCCESS),
    }
}
