use anyhow::Result;
use campus_launcher::core::LauncherError;
use campus_launcher::test_utils::{
    ARTIFACT_PATH, BUILD_NUMBER_PATH, KEYSTORE_PATH, RecordingLauncher, TestInstall,
    init_test_logging,
};
use campus_launcher::update::{RunOutcome, UpdateCoordinator};

/// Fresh machine: the folder is created, both files downloaded, the marker
/// set to the published build and the artifact launched.
#[tokio::test]
async fn test_fresh_install_downloads_and_launches() -> Result<()> {
    init_test_logging(None);
    let install = TestInstall::new()?;
    assert!(!install.dir().exists());

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create_async().await;
    let artifact = server
        .mock("GET", ARTIFACT_PATH)
        .with_body("server build 42")
        .expect(1)
        .create_async()
        .await;
    let keystore =
        server.mock("GET", KEYSTORE_PATH).with_body("keystore").expect(1).create_async().await;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(&server.url()), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(
        outcome,
        RunOutcome::Launched {
            updated: true,
            launch_error: None
        }
    ));
    assert_eq!(outcome.exit_code(), 0);
    assert!(install.dir().is_dir());
    assert_eq!(install.read_version().as_deref(), Some("42"));
    assert_eq!(install.read_artifact().as_deref(), Some(&b"server build 42"[..]));
    assert_eq!(install.read_keystore().as_deref(), Some(&b"keystore"[..]));
    assert_eq!(launcher.launched(), vec![install.artifact_path()]);

    artifact.assert_async().await;
    keystore.assert_async().await;
    Ok(())
}

/// Matching build with both files present: no download requests at all.
#[tokio::test]
async fn test_up_to_date_launches_without_downloading() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(42, b"installed", b"store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create_async().await;
    let artifact = server.mock("GET", ARTIFACT_PATH).expect(0).create_async().await;
    let keystore = server.mock("GET", KEYSTORE_PATH).expect(0).create_async().await;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(&server.url()), launcher.clone())?
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
    assert_eq!(install.read_version().as_deref(), Some("42"));
    assert_eq!(install.read_artifact().as_deref(), Some(&b"installed"[..]));
    assert_eq!(launcher.launched().len(), 1);

    artifact.assert_async().await;
    keystore.assert_async().await;
    Ok(())
}

/// Newer build published: the artifact is replaced, the existing key-store
/// is kept without a request, and the marker moves forward.
#[tokio::test]
async fn test_new_build_replaces_artifact_and_keeps_keystore() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(41, b"build 41", b"original store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42\n").create_async().await;
    let artifact =
        server.mock("GET", ARTIFACT_PATH).with_body("build 42").expect(1).create_async().await;
    let keystore = server.mock("GET", KEYSTORE_PATH).expect(0).create_async().await;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(&server.url()), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(
        outcome,
        RunOutcome::Launched {
            updated: true,
            ..
        }
    ));
    assert_eq!(install.read_version().as_deref(), Some("42"));
    assert_eq!(install.read_artifact().as_deref(), Some(&b"build 42"[..]));
    assert_eq!(install.read_keystore().as_deref(), Some(&b"original store"[..]));

    artifact.assert_async().await;
    keystore.assert_async().await;
    Ok(())
}

/// Matching marker but a deleted artifact still triggers a download.
#[tokio::test]
async fn test_missing_artifact_forces_download() -> Result<()> {
    let install = TestInstall::new()?;
    install.write_version(42)?;
    install.write_keystore(b"store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create_async().await;
    let artifact =
        server.mock("GET", ARTIFACT_PATH).with_body("jar").expect(1).create_async().await;

    let outcome =
        UpdateCoordinator::new(install.config(&server.url()), RecordingLauncher::new())?
            .show_progress(false)
            .run()
            .await;

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(install.read_artifact().as_deref(), Some(&b"jar"[..]));
    artifact.assert_async().await;
    Ok(())
}

/// Artifact endpoint unreachable mid-update: the marker keeps its old value,
/// the installed artifact is untouched and nothing is launched.
#[tokio::test]
async fn test_unreachable_artifact_aborts_without_launch() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(41, b"build 41", b"store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create_async().await;

    let mut config = install.config(&server.url());
    config.artifact_url = "http://127.0.0.1:1/artifact".to_string();

    let launcher = RecordingLauncher::new();
    let outcome =
        UpdateCoordinator::new(config, launcher.clone())?.show_progress(false).run().await;

    match outcome {
        RunOutcome::Aborted(ref e) => assert!(e.is_network(), "unexpected error: {e}"),
        ref other => panic!("expected abort, got {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(install.read_version().as_deref(), Some("41"));
    assert_eq!(install.read_artifact().as_deref(), Some(&b"build 41"[..]));
    assert!(launcher.launched().is_empty());
    Ok(())
}

/// A failed key-store download aborts even though the artifact succeeded.
#[tokio::test]
async fn test_keystore_failure_aborts_without_marker() -> Result<()> {
    let install = TestInstall::new()?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("7").create_async().await;
    let _artifact = server.mock("GET", ARTIFACT_PATH).with_body("jar").create_async().await;
    let _keystore = server.mock("GET", KEYSTORE_PATH).with_status(500).create_async().await;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(&server.url()), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(
        outcome,
        RunOutcome::Aborted(LauncherError::HttpStatus {
            status: 500,
            ..
        })
    ));
    assert_eq!(install.read_version(), None);
    assert_eq!(install.read_keystore(), None);
    assert!(launcher.launched().is_empty());
    Ok(())
}

/// The OS refusing to open the artifact is reported but still counts as launched.
#[tokio::test]
async fn test_launch_failure_is_not_an_abort() -> Result<()> {
    let install = TestInstall::new()?;
    install.populate(3, b"jar", b"store")?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("3").create_async().await;

    let outcome = UpdateCoordinator::new(
        install.config(&server.url()),
        RecordingLauncher::failing("no application associated with .jar"),
    )?
    .show_progress(false)
    .run()
    .await;

    match &outcome {
        RunOutcome::Launched {
            launch_error: Some(LauncherError::LaunchFailed {
                reason,
                ..
            }),
            ..
        } => assert!(reason.contains(".jar")),
        other => panic!("expected launch error, got {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 0);
    Ok(())
}

/// A directory squatting on the key-store path is not an installed key-store:
/// the run tries the download once, cannot move it into place and aborts
/// instead of re-downloading the artifact on every start.
#[tokio::test]
async fn test_directory_at_keystore_path_aborts() -> Result<()> {
    let install = TestInstall::new()?;
    install.write_version(42)?;
    install.write_artifact(b"build 42")?;
    std::fs::create_dir_all(install.keystore_path())?;

    let mut server = mockito::Server::new_async().await;
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create_async().await;
    let artifact =
        server.mock("GET", ARTIFACT_PATH).with_body("build 42").expect(1).create_async().await;
    let keystore =
        server.mock("GET", KEYSTORE_PATH).with_body("store").expect(1).create_async().await;

    let launcher = RecordingLauncher::new();
    let outcome = UpdateCoordinator::new(install.config(&server.url()), launcher.clone())?
        .show_progress(false)
        .run()
        .await;

    assert!(matches!(outcome, RunOutcome::Aborted(LauncherError::FileSystemError { .. })));
    assert_eq!(install.read_version().as_deref(), Some("42"));
    assert!(install.keystore_path().is_dir());
    assert!(launcher.launched().is_empty());

    artifact.assert_async().await;
    keystore.assert_async().await;
    Ok(())
}
