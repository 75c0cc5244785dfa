//! Core types for the launcher.
//!
//! This module holds the error taxonomy shared by every component:
//!
//! - [`LauncherError`] - Enumerated failure modes (network, filesystem, launch, ...)
//! - [`ErrorContext`] - User-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! Network and filesystem failures are surfaced as typed values instead of
//! sentinel numbers, so the update flow can tell "the server is unreachable"
//! apart from "no version is installed yet".
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_launcher::core::{LauncherError, user_friendly_error};
//!
//! let error = LauncherError::DownloadFailed {
//!     url: "http://example.com/app.jar".to_string(),
//!     reason: "connection refused".to_string(),
//! };
//! user_friendly_error(error.into()).display();
//! ```

pub mod error;

pub use error::{ErrorContext, LauncherError, user_friendly_error};
