//! Utilities shared by the launcher components
//!
//! - [`fs`] - Atomic writes and directory helpers
//! - [`progress`] - Spinner shown while downloading

pub mod fs;
pub mod progress;
