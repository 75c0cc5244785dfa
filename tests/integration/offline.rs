//! Starts where the build number cannot be obtained.
//!
//! A failed lookup is its own branch: a complete install launches as-is, anything
//! less aborts. Neither path downloads or touches the version marker.

use anyhow::Result;
use campus_launcher::core::LauncherError;
use campus_launcher::test_utils::{
    ARTIFACT_PATH, BUILD_NUMBER_PATH, KEYSTORE_PATH, RecordingLauncher, TestInstall,
};
use campus_launcher::update::{RunOutcome, UpdateCoordinator};

const UNREACHABLE: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_unreachable_server_launches_complete_install() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(41, b"build 41", b"store")?;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(UNREACHABLE), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(
        outcome,
        RunOutcome::Launched {
            updated: false,
            launch_error: None
        }
    ));
    assert_eq!(install.read_version().as_deref(), Some("41"));
    assert_eq!(launcher.launched(), vec![install.artifact_path()]);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_on_fresh_machine_aborts() -> Result<()> {
    let install = TestInstall::new()?;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(UNREACHABLE), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(outcome, RunOutcome::Aborted(LauncherError::VersionUnavailable { .. })));
    assert_eq!(outcome.exit_code(), 1);
    // The folder is still prepared for the next start
    assert!(install.dir().is_dir());
    assert_eq!(install.read_version(), None);
    assert!(launcher.launched().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_keystore_without_server_aborts() -> Result<()> {
    let install = TestInstall::new()?;
    install.write_version(41)?;
    install.write_artifact(b"build 41")?;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(UNREACHABLE), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(outcome, RunOutcome::Aborted(_)));
    assert!(launcher.launched().is_empty());
    Ok(())
}

/// A garbage build number is treated like an unreachable server, not like build `0`.
#[tokio::test]
async fn test_malformed_build_number_skips_download() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(41, b"build 41", b"store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server
        .mock("GET", BUILD_NUMBER_PATH)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;
    let artifact = server.mock("GET", ARTIFACT_PATH).expect(0).create_async().await;
    let keystore = server.mock("GET", KEYSTORE_PATH).expect(0).create_async().await;

    let outcome =
        UpdateCoordinator::new(install.config(&server.url()), RecordingLauncher::new())?
            .show_progress(false)
            .run()
            .await;

    assert!(matches!(
        outcome,
        RunOutcome::Launched {
            updated: false,
            ..
        }
    ));
    assert_eq!(install.read_version().as_deref(), Some("41"));
    artifact.assert_async().await;
    keystore.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_server_error_on_fresh_machine_aborts() -> Result<()> {
    let install = TestInstall::new()?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_status(503).create_async().await;

    let outcome =
        UpdateCoordinator::new(install.config(&server.url()), RecordingLauncher::new())?
            .show_progress(false)
            .run()
            .await;

    match &outcome {
        RunOutcome::Aborted(LauncherError::VersionUnavailable {
            reason,
            ..
        }) => assert!(reason.contains("503"), "unexpected reason: {reason}"),
        other => panic!("expected VersionUnavailable, got {other:?}"),
    }
    Ok(())
}
