//! HTTP access to the update server.
//!
//! - [`RemoteVersionResolver`] asks the build-number endpoint for the latest build
//! - [`ArtifactFetcher`] downloads the artifact and the key-store
//!
//! Both share one `reqwest` client built by [`build_client`].

pub mod client;
pub mod fetcher;
pub mod resolver;

pub use client::build_client;
pub use fetcher::{ArtifactFetcher, FetchOutcome};
pub use resolver::{RemoteVersion, RemoteVersionResolver};
