//! Test utilities for the launcher
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] - one-time tracing setup that plays well with the test harness
//! - [`TestInstall`] - a throw-away install folder plus a config pointing at a mock server
//! - [`RecordingLauncher`] - a [`Launch`] implementation that records instead of opening files
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_launcher::test_utils::{RecordingLauncher, TestInstall};
//! use campus_launcher::update::UpdateCoordinator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let install = TestInstall::new()?;
//! let launcher = RecordingLauncher::new();
//! let outcome = UpdateCoordinator::new(install.config("http://127.0.0.1:1"), launcher.clone())?
//!     .show_progress(false)
//!     .run()
//!     .await;
//! assert!(launcher.launched().is_empty());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LauncherConfig;
use crate::core::LauncherError;
use crate::launch::Launch;

/// Mock server path answering with the build number.
pub const BUILD_NUMBER_PATH: &str = "/buildNumber";
/// Mock server path serving the artifact.
pub const ARTIFACT_PATH: &str = "/artifact";
/// Mock server path serving the key-store.
pub const KEYSTORE_PATH: &str = "/keystore";

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; stays silent when neither is set.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Temporary install folder. Removed when dropped.
pub struct TestInstall {
    temp: TempDir,
    dir: PathBuf,
}

impl TestInstall {
    /// Create a fresh temp dir. The install folder itself is not created.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let dir = temp.path().join("Swooosh").join("CampusLive");
        Ok(Self {
            temp,
            dir,
        })
    }

    /// Install folder.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Configuration rooted at this install folder whose endpoints live on `base_url`.
    pub fn config(&self, base_url: &str) -> LauncherConfig {
        LauncherConfig {
            build_number_url: format!("{base_url}{BUILD_NUMBER_PATH}"),
            artifact_url: format!("{base_url}{ARTIFACT_PATH}"),
            keystore_url: format!("{base_url}{KEYSTORE_PATH}"),
            request_timeout_secs: Some(10),
            ..LauncherConfig::default()
        }
        .with_install_dir(&self.dir)
    }

    /// Write [`Self::config`] as a TOML file next to the install folder and return its path.
    pub fn write_config_file(&self, base_url: &str) -> Result<PathBuf> {
        let path = self.temp.path().join("launcher.toml");
        fs::write(&path, toml::to_string(&self.config(base_url))?)?;
        Ok(path)
    }

    /// Path of the version marker.
    pub fn version_path(&self) -> PathBuf {
        self.config("").version_path()
    }

    /// Path of the artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.config("").artifact_path()
    }

    /// Path of the key-store.
    pub fn keystore_path(&self) -> PathBuf {
        self.config("").keystore_path()
    }

    /// Pre-populate an install: marker, artifact and key-store.
    pub fn populate(&self, version: u64, artifact: &[u8], keystore: &[u8]) -> Result<()> {
        self.write_version(version)?;
        self.write_artifact(artifact)?;
        self.write_keystore(keystore)
    }

    /// Write the version marker.
    pub fn write_version(&self, version: u64) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.version_path(), version.to_string())?;
        Ok(())
    }

    /// Write the artifact.
    pub fn write_artifact(&self, content: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.artifact_path(), content)?;
        Ok(())
    }

    /// Write the key-store.
    pub fn write_keystore(&self, content: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.keystore_path(), content)?;
        Ok(())
    }

    /// Put a directory where the version marker belongs so writing it fails.
    pub fn write_version_dir_in_place_of_marker(&self) -> Result<()> {
        fs::create_dir_all(self.version_path())?;
        Ok(())
    }

    /// Raw marker contents, `None` when the file does not exist.
    pub fn read_version(&self) -> Option<String> {
        fs::read_to_string(self.version_path()).ok()
    }

    /// Artifact bytes, `None` when the file does not exist.
    pub fn read_artifact(&self) -> Option<Vec<u8>> {
        fs::read(self.artifact_path()).ok()
    }

    /// Key-store bytes, `None` when the file does not exist.
    pub fn read_keystore(&self) -> Option<Vec<u8>> {
        fs::read(self.keystore_path()).ok()
    }
}

/// Records launch requests instead of opening anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<PathBuf>>>,
    fail_with: Option<String>,
}

impl RecordingLauncher {
    /// Launcher that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher that records the request, then reports `reason` as a launch failure.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Paths passed to [`Launch::launch`], in call order.
    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.lock().map(|l| l.to_vec()).unwrap_or_default()
    }
}

impl Launch for RecordingLauncher {
    fn launch(&self, artifact: &Path) -> Result<(), LauncherError> {
        if let Ok(mut launched) = self.launched.lock() {
            launched.push(artifact.to_path_buf());
        }

        match &self.fail_with {
            Some(reason) => Err(LauncherError::LaunchFailed {
                path: artifact.display().to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
