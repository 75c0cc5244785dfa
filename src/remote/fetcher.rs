//! Downloads of the application artifact and the key-store.
//!
//! Bodies are streamed into `<destination>.part` and renamed over the
//! destination once the last chunk is on disk. A transfer that fails midway
//! removes the partial file and leaves any previously installed file alone.

use futures::StreamExt;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::LauncherError;
use crate::utils::fs::partial_path;

/// What a fetch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was downloaded and moved into place.
    Downloaded {
        /// Number of body bytes written
        bytes: u64,
    },
    /// The file was already present; no request was made.
    AlreadyPresent,
}

/// Downloads the artifact and key-store from their fixed endpoints.
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    client: reqwest::Client,
    artifact_url: String,
    keystore_url: String,
}

impl ArtifactFetcher {
    /// Create a fetcher for the given endpoints.
    pub fn new(
        client: reqwest::Client,
        artifact_url: impl Into<String>,
        keystore_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            artifact_url: artifact_url.into(),
            keystore_url: keystore_url.into(),
        }
    }

    /// Download the artifact to `destination`, replacing any existing file.
    pub async fn fetch_artifact(&self, destination: &Path) -> Result<FetchOutcome, LauncherError> {
        info!("Trying to download application");
        let bytes = self.download(&self.artifact_url, destination).await?;
        info!("Successfully downloaded application ({} bytes)", bytes);
        Ok(FetchOutcome::Downloaded {
            bytes,
        })
    }

    /// Download the key-store to `destination` unless it already exists.
    ///
    /// The key-store is never refreshed: once a regular file is present no
    /// request is made, even across version changes. Anything else at the
    /// path (a directory, a dangling link) does not count as present.
    pub async fn fetch_keystore(&self, destination: &Path) -> Result<FetchOutcome, LauncherError> {
        info!("Trying to download keystore");
        if fs::metadata(destination).await.is_ok_and(|m| m.is_file()) {
            info!("Keystore already downloaded");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let bytes = self.download(&self.keystore_url, destination).await?;
        info!("Successfully downloaded keystore ({} bytes)", bytes);
        Ok(FetchOutcome::Downloaded {
            bytes,
        })
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64, LauncherError> {
        let partial = partial_path(destination);
        let result = match self.stream_to(url, &partial).await {
            Ok(bytes) => fs::rename(&partial, destination).await.map(|()| bytes).map_err(|e| {
                warn!("Failed to move {} into place: {}", partial.display(), e);
                LauncherError::FileSystemError {
                    operation: "replace downloaded file".to_string(),
                    path: destination.display().to_string(),
                }
            }),
            Err(e) => Err(e),
        };

        if result.is_err() {
            match fs::remove_file(&partial).await {
                Err(cleanup) if cleanup.kind() != std::io::ErrorKind::NotFound => {
                    warn!("Failed to remove partial download {}: {}", partial.display(), cleanup);
                }
                _ => {}
            }
        }
        result
    }

    async fn stream_to(&self, url: &str, partial: &Path) -> Result<u64, LauncherError> {
        debug!("GET {}", url);
        let download_failed = |e: reqwest::Error| LauncherError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let write_failed = |e: std::io::Error| {
            warn!("Failed to write {}: {}", partial.display(), e);
            LauncherError::FileSystemError {
                operation: "write download".to_string(),
                path: partial.display().to_string(),
            }
        };

        let response = self.client.get(url).send().await.map_err(download_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = fs::File::create(partial).await.map_err(write_failed)?;
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(download_failed)?;
            file.write_all(&chunk).await.map_err(write_failed)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_failed)?;
        file.sync_all().await.map_err(write_failed)?;

        debug!("Received {} bytes from {}", written, url);
        Ok(written)
    }
}
