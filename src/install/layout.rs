//! Install folder layout and the derived local install state.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LauncherConfig;
use crate::install::VersionStore;
use crate::utils::fs::ensure_dir;

/// Which of the downloaded files are present. Derived on every start, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInstallState {
    /// The application artifact exists.
    pub artifact_exists: bool,
    /// The key-store exists.
    pub keystore_exists: bool,
}

impl LocalInstallState {
    /// Both files are present.
    pub const fn is_complete(&self) -> bool {
        self.artifact_exists && self.keystore_exists
    }
}

/// The three files the launcher manages inside one folder.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    dir: PathBuf,
    artifact: PathBuf,
    keystore: PathBuf,
    versions: VersionStore,
}

impl InstallLayout {
    /// Layout described by `config`.
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self {
            dir: config.install_dir.clone(),
            artifact: config.artifact_path(),
            keystore: config.keystore_path(),
            versions: VersionStore::new(config.version_path()),
        }
    }

    /// Create the install folder if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.dir.exists() {
            debug!("Creating install folder {}", self.dir.display());
        }
        ensure_dir(&self.dir)
    }

    /// Install folder.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact path.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }

    /// Key-store path.
    pub fn keystore_path(&self) -> &Path {
        &self.keystore
    }

    /// Version marker store.
    pub fn versions(&self) -> &VersionStore {
        &self.versions
    }

    /// Check which files are currently on disk.
    pub fn state(&self) -> LocalInstallState {
        LocalInstallState {
            artifact_exists: self.artifact.is_file(),
            keystore_exists: self.keystore.is_file(),
        }
    }
}
