//! Local install folder management.
//!
//! The folder holds three files:
//!
//! - `version.txt` - the version marker, see [`VersionStore`]
//! - the application artifact, opened by the OS after every run
//! - the key-store, fetched once and kept forever
//!
//! [`InstallLayout`] resolves their paths from the configuration and reports
//! a [`LocalInstallState`] describing which of the downloads are present.

pub mod layout;
pub mod version_store;

pub use layout::{InstallLayout, LocalInstallState};
pub use version_store::VersionStore;
