//! Orchestration of one check-update-launch cycle.
//!
//! ```text
//! Idle ──► Checking ──► NoUpdateNeeded ─────────────────► launch
//!              │
//!              ├──► Downloading ──► Done ── write marker ─► launch
//!              │         │
//!              └─────────┴──► Failed ──► abort without launching
//! ```
//!
//! The download runs on a single spawned task. Its result travels back over
//! a `oneshot` channel, so the coordinator observes completion exactly once
//! and can neither write the marker nor launch twice. While it waits, the
//! spinner keeps animating.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::config::LauncherConfig;
use crate::constants::{DOWNLOAD_MESSAGE, EXIT_ABORTED, EXIT_LAUNCHED};
use crate::core::LauncherError;
use crate::install::InstallLayout;
use crate::launch::Launch;
use crate::remote::{ArtifactFetcher, FetchOutcome, RemoteVersionResolver, build_client};
use crate::update::decision::{UpdateDecision, decide};
use crate::utils::progress::ProgressBar;

/// State of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing happened yet.
    Idle,
    /// Reading the local state and asking the server for the latest build.
    Checking,
    /// The installed build is current (or the server is unreachable but the install is complete).
    NoUpdateNeeded,
    /// The background download is running.
    Downloading,
    /// Both downloads succeeded.
    Done,
    /// The run cannot launch anything.
    Failed,
}

impl Phase {
    /// Whether the state machine allows moving from `self` to `next`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Checking)
                | (Self::Checking, Self::NoUpdateNeeded)
                | (Self::Checking, Self::Downloading)
                | (Self::Checking, Self::Failed)
                | (Self::Downloading, Self::Done)
                | (Self::Downloading, Self::Failed)
        )
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The artifact was handed to the OS.
    Launched {
        /// Whether a new build was downloaded during this run
        updated: bool,
        /// Set when the OS refused to open the artifact
        launch_error: Option<LauncherError>,
    },
    /// Nothing was launched.
    Aborted(LauncherError),
}

impl RunOutcome {
    /// Process exit status for this outcome.
    ///
    /// A launch attempt always exits with [`EXIT_LAUNCHED`], even when the OS
    /// refused to open the file; aborted runs exit with [`EXIT_ABORTED`].
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Launched {
                ..
            } => EXIT_LAUNCHED,
            Self::Aborted(_) => EXIT_ABORTED,
        }
    }
}

/// Runs the update flow and hands off to the launcher.
///
/// # Examples
///
/// ```rust,no_run
/// use campus_launcher::config::LauncherConfig;
/// use campus_launcher::launch::OsLauncher;
/// use campus_launcher::update::{RunOutcome, UpdateCoordinator};
///
/// # async fn example() -> anyhow::Result<()> {
/// let coordinator = UpdateCoordinator::new(LauncherConfig::default(), OsLauncher)?;
/// match coordinator.run().await {
///     RunOutcome::Launched { updated, .. } => println!("launched (updated: {updated})"),
///     RunOutcome::Aborted(e) => eprintln!("{e}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct UpdateCoordinator<L> {
    layout: InstallLayout,
    resolver: RemoteVersionResolver,
    fetcher: ArtifactFetcher,
    launcher: L,
    show_progress: bool,
    phase: Phase,
}

impl<L: Launch> UpdateCoordinator<L> {
    /// Create a coordinator for `config` that launches through `launcher`.
    pub fn new(config: LauncherConfig, launcher: L) -> Result<Self> {
        config.validate()?;
        let client = build_client(config.request_timeout())?;

        Ok(Self {
            layout: InstallLayout::from_config(&config),
            resolver: RemoteVersionResolver::new(client.clone(), config.build_number_url.clone()),
            fetcher: ArtifactFetcher::new(
                client,
                config.artifact_url.clone(),
                config.keystore_url.clone(),
            ),
            launcher,
            show_progress: true,
            phase: Phase::Idle,
        })
    }

    /// Show or hide the spinner while downloading.
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Current state.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one full cycle. Consumes the coordinator: one run, at most one download task.
    pub async fn run(mut self) -> RunOutcome {
        self.transition(Phase::Checking);

        let decision = match self.check().await {
            Ok(decision) => decision,
            Err(e) => return self.fail(e),
        };

        match decision {
            UpdateDecision::UpToDate {
                version,
            } => {
                info!("Build {} is up to date", version);
                self.transition(Phase::NoUpdateNeeded);
                self.launch(false)
            }
            UpdateDecision::LaunchInstalled {
                version,
                reason,
            } => {
                warn!("Could not check for updates ({}), launching installed build {}", reason, version);
                self.transition(Phase::NoUpdateNeeded);
                self.launch(false)
            }
            UpdateDecision::CannotInstall(reason) => self.fail(reason),
            UpdateDecision::Update {
                from,
                to,
            } => {
                info!("Updating from build {} to {}", from, to);
                self.transition(Phase::Downloading);

                match self.download_in_background().await {
                    Ok(report) => {
                        debug!("Artifact: {:?}, keystore: {:?}", report.artifact, report.keystore);
                        self.transition(Phase::Done);
                        if let Err(e) = self.layout.versions().write(to) {
                            // Next start sees the old marker and downloads again
                            warn!("{:#}", e);
                        }
                        self.launch(true)
                    }
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    /// Inspect the install folder and the server and decide what to do.
    ///
    /// Creates the install folder if it is missing.
    pub async fn check(&self) -> Result<UpdateDecision, LauncherError> {
        self.layout.ensure_exists().map_err(|e| {
            warn!("{:#}", e);
            LauncherError::FileSystemError {
                operation: "create install folder".to_string(),
                path: self.layout.dir().display().to_string(),
            }
        })?;

        let local_version = self.layout.versions().read();
        let remote_version = self.resolver.fetch_latest().await;
        let state = self.layout.state();
        debug!(
            "Local install: artifact present: {}, keystore present: {}",
            state.artifact_exists, state.keystore_exists
        );

        Ok(decide(local_version, &remote_version, state))
    }

    async fn download_in_background(&self) -> Result<DownloadReport, LauncherError> {
        let (done_tx, done_rx) = oneshot::channel();
        let fetcher = self.fetcher.clone();
        let artifact = self.layout.artifact_path().to_path_buf();
        let keystore = self.layout.keystore_path().to_path_buf();

        tokio::spawn(async move {
            let result = download_update(&fetcher, &artifact, &keystore).await;
            if done_tx.send(result).is_err() {
                debug!("Download finished after the coordinator stopped waiting");
            }
        });

        let spinner = ProgressBar::new_spinner(!self.show_progress);
        spinner.set_message(DOWNLOAD_MESSAGE);

        // A dropped sender means the task panicked before reporting
        let result = done_rx.await.unwrap_or(Err(LauncherError::BackgroundTaskLost));
        spinner.finish_and_clear();
        result
    }

    fn launch(&self, updated: bool) -> RunOutcome {
        let artifact: PathBuf = self.layout.artifact_path().to_path_buf();
        let launch_error = match self.launcher.launch(&artifact) {
            Ok(()) => {
                info!("Launched {}", artifact.display());
                None
            }
            Err(e) => {
                warn!("{}", e);
                Some(e)
            }
        };

        RunOutcome::Launched {
            updated,
            launch_error,
        }
    }

    fn fail(&mut self, reason: LauncherError) -> RunOutcome {
        self.transition(Phase::Failed);
        error!("Update failed: {}", reason);
        RunOutcome::Aborted(reason)
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!("{:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// What a completed download cycle did with each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadReport {
    /// Artifact fetch result
    pub artifact: FetchOutcome,
    /// Key-store fetch result
    pub keystore: FetchOutcome,
}

/// Download the artifact, then the key-store. The key-store is not attempted
/// when the artifact fails.
pub async fn download_update(
    fetcher: &ArtifactFetcher,
    artifact: &Path,
    keystore: &Path,
) -> Result<DownloadReport, LauncherError> {
    let artifact = fetcher.fetch_artifact(artifact).await?;
    let keystore = fetcher.fetch_keystore(keystore).await?;
    Ok(DownloadReport {
        artifact,
        keystore,
    })
}
