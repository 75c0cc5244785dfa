//! Build-time constants used throughout the launcher.
//!
//! The remote endpoints and the install folder layout are fixed when the
//! launcher is built. [`LauncherConfig`](crate::config::LauncherConfig) uses
//! these values as its defaults.

/// Endpoint whose body's first line is the latest successful build number.
pub const BUILD_NUMBER_URL: &str =
    "http://swooosh.ddns.net:8080/job/CampusLiveServer/lastSuccessfulBuild/buildNumber";

/// Endpoint serving the raw application artifact of the latest build.
pub const ARTIFACT_URL: &str = "http://swooosh.ddns.net:8080/job/CampusLiveServer/lastSuccessfulBuild/artifact/target/CampusLiveServer.jar";

/// Endpoint serving the raw key-store. Pinned to a specific build because the
/// key-store is fetched once and never replaced.
pub const KEYSTORE_URL: &str =
    "http://swooosh.ddns.net:8080/job/CampusLiveStudent/27/artifact/target/campuslive.store";

/// Vendor folder under the platform's local data directory.
pub const VENDOR_DIR: &str = "Swooosh";

/// Application folder under [`VENDOR_DIR`].
pub const APP_DIR: &str = "CampusLive";

/// File holding the version marker (decimal build number).
pub const VERSION_FILE_NAME: &str = "version.txt";

/// File name of the downloaded application artifact.
pub const ARTIFACT_FILE_NAME: &str = "CampusLiveServer.jar";

/// File name of the downloaded key-store.
pub const KEYSTORE_FILE_NAME: &str = "campuslive.store";

/// Suffix of the in-flight download file, renamed over the target once complete.
pub const PARTIAL_DOWNLOAD_SUFFIX: &str = "part";

/// Spinner label shown while the background download runs.
pub const DOWNLOAD_MESSAGE: &str = "Please be patient while downloading...";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("campus-launcher/", env!("CARGO_PKG_VERSION"));

/// Exit status when the artifact was handed to the OS (updated or not).
pub const EXIT_LAUNCHED: i32 = 0;

/// Exit status when the run aborted without launching.
pub const EXIT_ABORTED: i32 = 1;
