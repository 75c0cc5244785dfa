//! The update rule.
//!
//! An update runs when the installed build differs from the published one,
//! when nothing was ever installed (marker `0`), or when either downloaded
//! file is missing. [`needs_update`] is that rule on plain numbers;
//! [`decide`] applies it to a [`RemoteVersion`] so a failed lookup gets its
//! own branch instead of masquerading as build `0`.

use crate::core::LauncherError;
use crate::install::LocalInstallState;
use crate::remote::RemoteVersion;

/// Whether a download cycle must run.
///
/// `local_version != remote_version || local_version == 0 || !artifact_exists || !keystore_exists`
pub const fn needs_update(
    local_version: u64,
    remote_version: u64,
    artifact_exists: bool,
    keystore_exists: bool,
) -> bool {
    local_version != remote_version || local_version == 0 || !artifact_exists || !keystore_exists
}

/// Outcome of the startup check.
#[derive(Debug, Clone)]
pub enum UpdateDecision {
    /// Installed build matches the published one and both files are present.
    UpToDate {
        /// Installed build number
        version: u64,
    },
    /// A download cycle must run and the marker will be set to `to` afterwards.
    Update {
        /// Installed build number (`0` when none)
        from: u64,
        /// Published build number
        to: u64,
    },
    /// The server could not be asked, but a complete install exists.
    LaunchInstalled {
        /// Installed build number
        version: u64,
        /// Why the lookup failed
        reason: LauncherError,
    },
    /// The server could not be asked and there is nothing usable installed.
    CannotInstall(LauncherError),
}

/// Decide what the launcher does on this start.
pub fn decide(local_version: u64, remote: &RemoteVersion, state: LocalInstallState) -> UpdateDecision {
    match remote {
        RemoteVersion::Available(remote_version) => {
            if needs_update(
                local_version,
                *remote_version,
                state.artifact_exists,
                state.keystore_exists,
            ) {
                UpdateDecision::Update {
                    from: local_version,
                    to: *remote_version,
                }
            } else {
                UpdateDecision::UpToDate {
                    version: local_version,
                }
            }
        }
        RemoteVersion::Unavailable(reason) => {
            if local_version != 0 && state.is_complete() {
                UpdateDecision::LaunchInstalled {
                    version: local_version,
                    reason: reason.clone(),
                }
            } else {
                UpdateDecision::CannotInstall(reason.clone())
            }
        }
    }
}
