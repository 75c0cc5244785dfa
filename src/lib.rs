//! Self-updating launcher for the CampusLive server application.
//!
//! On every start the launcher compares the locally recorded build number with
//! the latest build published by the CI server. When they differ, or when one
//! of the installed files is missing, it downloads the application artifact and
//! the key-store on a background task while a spinner keeps the terminal alive,
//! records the new build number and finally hands the artifact to the operating
//! system to open.
//!
//! # Architecture Overview
//!
//! ```text
//! cli ──► update::coordinator ──► update::decision   (pure rule)
//!                │                 install::version_store
//!                │                 install::layout
//!                ├──► remote::resolver (build number)
//!                ├──► remote::fetcher  (artifact + key-store, background task)
//!                └──► launch            (open with OS handler)
//! ```
//!
//! # Modules
//!
//! - [`install`] - Local install folder: version marker and file presence
//! - [`remote`] - HTTP access to the build-number and download endpoints
//! - [`update`] - Update decision rule and the coordinator state machine
//! - [`launch`] - Hand-off to the operating system
//! - [`config`] - Launcher configuration and its build-time defaults
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - Atomic file writes and progress indicators
//! - [`cli`] - Command-line entry point
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_launcher::config::LauncherConfig;
//! use campus_launcher::launch::OsLauncher;
//! use campus_launcher::update::UpdateCoordinator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = LauncherConfig::default();
//! let coordinator = UpdateCoordinator::new(config, OsLauncher)?;
//! let outcome = coordinator.run().await;
//! std::process::exit(outcome.exit_code());
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod install;
pub mod launch;
pub mod remote;
pub mod update;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
