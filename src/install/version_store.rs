//! Persistence of the version marker.
//!
//! The marker is a single decimal build number stored as plain text. Anything
//! that prevents reading a number (missing file, permission problem, garbage
//! content) is reported as "no version known", which is build `0`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::utils::fs::safe_write;

/// Reads and writes the locally installed build number.
///
/// # Examples
///
/// ```rust,no_run
/// use campus_launcher::install::VersionStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let store = VersionStore::new("/data/CampusLive/version.txt");
/// if store.read() == 0 {
///     println!("nothing installed yet");
/// }
/// store.write(42)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    /// Create a store backed by the marker file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the installed build number.
    ///
    /// Only the first line is considered. Returns `0` when the file is
    /// missing, unreadable, empty or does not hold a non-negative integer.
    pub fn read(&self) -> u64 {
        debug!("Getting local version...");

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No version marker at {}", self.path.display());
                return 0;
            }
            Err(e) => {
                warn!("Failed to read version marker {}: {}", self.path.display(), e);
                return 0;
            }
        };

        let version = parse_marker(&content).unwrap_or_else(|| {
            warn!("Ignoring unparseable version marker: {:?}", content.lines().next().unwrap_or(""));
            0
        });
        info!("Local version: {}", version);
        version
    }

    /// Overwrite the marker with `version`.
    ///
    /// The new content is written to a temporary file and renamed into place,
    /// so a crash leaves either the old or the new number on disk.
    pub fn write(&self, version: u64) -> Result<()> {
        debug!("Setting local version...");
        safe_write(&self.path, &version.to_string()).with_context(|| {
            format!("Failed to write version marker: {}", self.path.display())
        })?;
        info!("Local version set to {}", version);
        Ok(())
    }
}

/// Parse the first line of a marker file.
fn parse_marker(content: &str) -> Option<u64> {
    content.lines().next()?.trim().parse().ok()
}
