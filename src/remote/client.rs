//! Shared HTTP client construction.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::constants::USER_AGENT;

/// Build the client used for the build-number and download requests.
///
/// No timeout is applied unless one is configured.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}
