//! CampusLive launcher entry point
//!
//! Parses the command line, runs one check-update-launch cycle and maps the
//! outcome to the process exit status: `0` when the application was handed
//! to the OS, `1` when nothing could be launched.

use campus_launcher::cli;
use campus_launcher::constants::EXIT_ABORTED;
use campus_launcher::core::user_friendly_error;
use campus_launcher::update::RunOutcome;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(outcome) => {
            if let RunOutcome::Aborted(ref e) = outcome {
                user_friendly_error(anyhow::Error::new(e.clone())).display();
            }
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(EXIT_ABORTED);
        }
    }
}
