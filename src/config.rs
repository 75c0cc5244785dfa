//! Launcher configuration.
//!
//! Every value has a build-time default taken from [`crate::constants`], so a
//! plain `campus-launcher` run needs no configuration at all. A TOML file
//! passed with `--config` may override any subset of the fields:
//!
//! ```toml
//! install_dir = "/opt/campuslive"
//! build_number_url = "http://ci.example.com/job/CampusLiveServer/lastSuccessfulBuild/buildNumber"
//! request_timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::constants;
use crate::core::LauncherError;

/// Settings for one check-update-launch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Folder holding the version marker, artifact and key-store.
    pub install_dir: PathBuf,
    /// Version marker file name inside `install_dir`.
    pub version_file: String,
    /// Artifact file name inside `install_dir`.
    pub artifact_file: String,
    /// Key-store file name inside `install_dir`.
    pub keystore_file: String,
    /// Endpoint answering with the latest build number.
    pub build_number_url: String,
    /// Endpoint serving the artifact bytes.
    pub artifact_url: String,
    /// Endpoint serving the key-store bytes.
    pub keystore_url: String,
    /// Per-request timeout. `None` waits as long as the server keeps the connection open.
    pub request_timeout_secs: Option<u64>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            version_file: constants::VERSION_FILE_NAME.to_string(),
            artifact_file: constants::ARTIFACT_FILE_NAME.to_string(),
            keystore_file: constants::KEYSTORE_FILE_NAME.to_string(),
            build_number_url: constants::BUILD_NUMBER_URL.to_string(),
            artifact_url: constants::ARTIFACT_URL.to_string(),
            keystore_url: constants::KEYSTORE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl LauncherConfig {
    /// Load the configuration from an optional override file.
    ///
    /// Without a path the built-in defaults are returned.
    pub async fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load a TOML override file. Missing keys keep their defaults.
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading launcher configuration from {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| LauncherError::ConfigError {
            message: format!("{}: {}", path.display(), e.message()),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot describe a usable install.
    pub fn validate(&self) -> Result<(), LauncherError> {
        let names = [
            ("version_file", &self.version_file),
            ("artifact_file", &self.artifact_file),
            ("keystore_file", &self.keystore_file),
        ];
        for (key, name) in names {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(LauncherError::ConfigError {
                    message: format!("{key} must be a plain file name, got '{name}'"),
                });
            }
        }
        if self.artifact_file == self.keystore_file || self.artifact_file == self.version_file {
            return Err(LauncherError::ConfigError {
                message: "artifact_file must differ from keystore_file and version_file"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Path of the version marker file.
    pub fn version_path(&self) -> PathBuf {
        self.install_dir.join(&self.version_file)
    }

    /// Path of the downloaded artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.install_dir.join(&self.artifact_file)
    }

    /// Path of the downloaded key-store.
    pub fn keystore_path(&self) -> PathBuf {
        self.install_dir.join(&self.keystore_file)
    }

    /// Request timeout as a [`Duration`], if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Copy of this configuration rooted at a different install folder.
    #[must_use]
    pub fn with_install_dir(mut self, install_dir: impl Into<PathBuf>) -> Self {
        self.install_dir = install_dir.into();
        self
    }
}

/// Default install folder: `<local data dir>/Swooosh/CampusLive`.
///
/// On Windows this is `%LOCALAPPDATA%\Swooosh\CampusLive`. When no data
/// directory can be determined the folder is placed under
/// `~/AppData/Local`, and as a last resort under the working directory.
pub fn default_install_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("AppData").join("Local")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(constants::VENDOR_DIR)
        .join(constants::APP_DIR)
}
