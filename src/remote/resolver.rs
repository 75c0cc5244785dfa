//! Lookup of the latest published build number.

use tracing::{debug, info, warn};

use crate::core::LauncherError;

/// Result of asking the server for the latest build.
///
/// Keeps "the server said N" apart from "the server could not be asked",
/// which a bare `0` cannot.
#[derive(Debug, Clone)]
pub enum RemoteVersion {
    /// The server published this build number.
    Available(u64),
    /// The lookup failed.
    Unavailable(LauncherError),
}

impl RemoteVersion {
    /// The build number, or `0` when the lookup failed.
    pub const fn or_sentinel(&self) -> u64 {
        match self {
            Self::Available(version) => *version,
            Self::Unavailable(_) => 0,
        }
    }
}

/// Fetches the latest build number from the build-number endpoint.
///
/// One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct RemoteVersionResolver {
    client: reqwest::Client,
    url: String,
}

impl RemoteVersionResolver {
    /// Create a resolver for `url`.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetch the latest build number, logging and wrapping any failure.
    pub async fn fetch_latest(&self) -> RemoteVersion {
        debug!("Getting online version...");
        match self.try_fetch_latest().await {
            Ok(version) => {
                info!("Online version: {}", version);
                RemoteVersion::Available(version)
            }
            Err(e) => {
                warn!("Online version unavailable: {}", e);
                RemoteVersion::Unavailable(e)
            }
        }
    }

    /// Fetch the latest build number.
    ///
    /// The first line of the response body, trimmed, must be a non-negative
    /// integer.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::VersionUnavailable`] on connection errors, timeouts,
    ///   non-success responses or unreadable bodies
    /// - [`LauncherError::MalformedVersion`] on empty or non-numeric bodies
    pub async fn try_fetch_latest(&self) -> Result<u64, LauncherError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            LauncherError::VersionUnavailable {
                url: self.url.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::VersionUnavailable {
                url: self.url.clone(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().await.map_err(|e| LauncherError::VersionUnavailable {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        parse_build_number(&body)
    }
}

/// Parse the first line of a build-number response.
pub fn parse_build_number(body: &str) -> Result<u64, LauncherError> {
    let first_line = body.lines().next().unwrap_or("").trim();
    first_line.parse().map_err(|_| LauncherError::MalformedVersion {
        body: first_line.to_string(),
    })
}
