//! Error handling for the launcher
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** so the update flow can branch on the failure kind
//! 2. **User-friendly messages** with a hint on what to try next
//!
//! # Error Categories
//!
//! - **Remote**: [`LauncherError::VersionUnavailable`], [`LauncherError::MalformedVersion`],
//!   [`LauncherError::DownloadFailed`], [`LauncherError::HttpStatus`]
//! - **File System**: [`LauncherError::FileSystemError`]
//! - **Launch**: [`LauncherError::LaunchFailed`]
//! - **Configuration**: [`LauncherError::ConfigError`]
//! - **Coordination**: [`LauncherError::BackgroundTaskLost`]
//!
//! Use [`user_friendly_error`] to turn any error chain into an [`ErrorContext`]
//! ready to be printed to the terminal.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for launcher operations.
#[derive(Error, Debug, Clone)]
pub enum LauncherError {
    /// The build-number endpoint could not be queried.
    ///
    /// Covers DNS failures, refused connections, timeouts and unreadable bodies.
    #[error("Could not fetch the latest build number from {url}")]
    VersionUnavailable {
        /// Build-number endpoint
        url: String,
        /// Underlying transport error
        reason: String,
    },

    /// The build-number endpoint answered with something that is not a build number.
    #[error("Build number response is not a valid number: '{body}'")]
    MalformedVersion {
        /// First line of the response body
        body: String,
    },

    /// A download request failed before the body was fully received.
    #[error("Failed to download {url}")]
    DownloadFailed {
        /// Download endpoint
        url: String,
        /// Underlying transport or I/O error
        reason: String,
    },

    /// The server answered with a non-success HTTP status.
    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// A local file operation failed.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// What was being done (e.g. "write version marker")
        operation: String,
        /// Path involved
        path: String,
    },

    /// The operating system refused to open the artifact.
    #[error("Failed to launch {path}")]
    LaunchFailed {
        /// Artifact path
        path: String,
        /// Reason reported by the OS handler
        reason: String,
    },

    /// The launcher configuration is unusable.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// The background download task ended without reporting a result.
    #[error("Download task ended without reporting a result")]
    BackgroundTaskLost,

    /// Any other error, already rendered to text.
    #[error("{message}")]
    Other {
        /// Rendered error message
        message: String,
    },
}

impl LauncherError {
    /// Whether the error came from talking to the update server.
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::VersionUnavailable { .. } | Self::DownloadFailed { .. } | Self::HttpStatus { .. }
        )
    }
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// This replaces the modal error dialog of a desktop launcher: it is printed
/// once to stderr right before the process exits.
///
/// # Examples
///
/// ```rust,no_run
/// use campus_launcher::core::{ErrorContext, LauncherError};
///
/// let context = ErrorContext::new(LauncherError::BackgroundTaskLost)
///     .with_suggestion("Start the launcher again")
///     .with_details("The download worker stopped unexpectedly");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying launcher error
    pub error: LauncherError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without details or suggestion.
    #[must_use]
    pub const fn new(error: LauncherError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// Walks the error chain looking for a [`LauncherError`] first, then for a
/// raw [`std::io::Error`]. Anything else is rendered as-is.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(launcher_error) = cause.downcast_ref::<LauncherError>() {
            return create_error_context(launcher_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(LauncherError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that your user can write to the install folder")
                .with_details(io_error.to_string());
            }
            std::io::ErrorKind::StorageFull => {
                return ErrorContext::new(LauncherError::FileSystemError {
                    operation: "file write".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Free some disk space and start the launcher again");
            }
            _ => {}
        }
    }

    ErrorContext::new(LauncherError::Other {
        message: format!("{error:#}"),
    })
}

// Build-number errors only reach the user when no complete install exists
const NOT_DOWNLOADED: &str =
    "No complete install was found, and the application download was not attempted";

fn create_error_context(error: LauncherError) -> ErrorContext {
    match &error {
        LauncherError::VersionUnavailable {
            reason,
            ..
        } => {
            let details = format!("{reason}. {NOT_DOWNLOADED}");
            ErrorContext::new(error)
                .with_suggestion("Check your internet connection and start the launcher again")
                .with_details(details)
        }
        LauncherError::MalformedVersion {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The update server may be misconfigured. Try again later")
            .with_details(format!(
                "The build-number endpoint must answer with a decimal number. {NOT_DOWNLOADED}"
            )),
        LauncherError::DownloadFailed {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Failed to download application! Please try again")
                .with_details(reason)
        }
        LauncherError::HttpStatus {
            status,
            ..
        } => {
            let details = if *status == 404 {
                "The requested build is not published on the update server"
            } else {
                "The update server rejected the request"
            };
            ErrorContext::new(error)
                .with_suggestion("Failed to download application! Please try again")
                .with_details(details)
        }
        LauncherError::FileSystemError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check permissions and free space of the install folder"),
        LauncherError::LaunchFailed {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Make sure a program is associated with this file type")
                .with_details(reason)
        }
        LauncherError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or start without --config"),
        LauncherError::BackgroundTaskLost => ErrorContext::new(error)
            .with_suggestion("Start the launcher again")
            .with_details("The download worker stopped before reporting success or failure"),
        LauncherError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
