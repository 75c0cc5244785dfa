//! Hand-off of the installed artifact to the operating system.
//!
//! The launcher does not execute the artifact itself; it asks the OS to open
//! it with whatever program is associated with the file type (for a `.jar`
//! that is usually the Java runtime). The launcher process exits right after.

use std::path::Path;
use tracing::info;

use crate::core::LauncherError;

/// Something that can open the installed artifact.
pub trait Launch: Send + Sync {
    /// Open `artifact`. Returns once the request was handed off.
    fn launch(&self, artifact: &Path) -> Result<(), LauncherError>;
}

/// Opens files with the OS-associated handler via the `open` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLauncher;

impl Launch for OsLauncher {
    fn launch(&self, artifact: &Path) -> Result<(), LauncherError> {
        info!("Trying to launch application");

        if !artifact.is_file() {
            return Err(LauncherError::LaunchFailed {
                path: artifact.display().to_string(),
                reason: "file does not exist".to_string(),
            });
        }

        open::that_detached(artifact).map_err(|e| LauncherError::LaunchFailed {
            path: artifact.display().to_string(),
            reason: e.to_string(),
        })
    }
}
