//! Command-line interface for the launcher.
//!
//! The launcher has no subcommands: running it performs one
//! check-update-launch cycle and exits.
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--no-progress` - Hide the download spinner
//! - `--config <PATH>` - Override defaults from a TOML file
//!
//! ```bash
//! campus-launcher
//! campus-launcher --verbose
//! campus-launcher --quiet --no-progress --config launcher.toml
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::LauncherConfig;
use crate::launch::OsLauncher;
use crate::update::{RunOutcome, UpdateCoordinator};

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Hide the download spinner.
    pub no_progress: bool,
    /// TOML file overriding the built-in configuration.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber. `RUST_LOG` takes precedence over
    /// the level chosen by the flags.
    ///
    /// Logs go to stderr. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Self-updating launcher for CampusLive.
#[derive(Parser, Debug)]
#[command(
    name = "campus-launcher",
    about = "Keep CampusLive up to date and launch it",
    version,
    long_about = "Checks the build server for a newer CampusLive build, downloads it into the \
                  local install folder when needed, and opens the installed application."
)]
pub struct Cli {
    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long)]
    quiet: bool,

    /// Do not show the spinner while downloading.
    #[arg(long)]
    no_progress: bool,

    /// Path to a TOML file overriding the built-in settings.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Run one check-update-launch cycle with the OS launcher.
    ///
    /// Returns `Err` only when the launcher could not be set up (bad config,
    /// HTTP client failure). Failures during the cycle are reported through
    /// [`RunOutcome::Aborted`].
    pub async fn execute(self) -> Result<RunOutcome> {
        let config = self.build_config();
        config.init_logging();
        execute_with_config(config).await
    }

    /// Translate the flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
        }
    }
}

/// Load the launcher configuration described by `config` and run the cycle.
pub async fn execute_with_config(config: CliConfig) -> Result<RunOutcome> {
    let launcher_config = LauncherConfig::load_with_optional(config.config_path.as_deref()).await?;
    tracing::debug!("Install folder: {}", launcher_config.install_dir.display());

    let coordinator =
        UpdateCoordinator::new(launcher_config, OsLauncher)?.show_progress(!config.no_progress);
    Ok(coordinator.run().await)
}
