//! Update decision and orchestration.
//!
//! - [`decision`] - The pure rule deciding whether a download cycle runs
//! - [`coordinator`] - The state machine driving check, download and launch

pub mod coordinator;
pub mod decision;

pub use coordinator::{DownloadReport, Phase, RunOutcome, UpdateCoordinator, download_update};
pub use decision::{UpdateDecision, decide, needs_update};
