//! Progress indicator shown while the update downloads.
//!
//! Wraps an `indicatif` spinner with the launcher's styling. The spinner
//! ticks on its own thread, so it keeps animating while the foreground task
//! is parked awaiting the background download.
//!
//! Progress output is suppressed when `--no-progress` or `--quiet` is passed.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// A spinner for indeterminate work such as downloads of unknown size.
///
/// # Examples
///
/// ```rust
/// use campus_launcher::utils::progress::ProgressBar;
///
/// let spinner = ProgressBar::new_spinner(false);
/// spinner.set_message("Please be patient while downloading...");
/// spinner.finish_and_clear();
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a spinner that animates every 100ms, or a hidden one when `hidden` is set.
    pub fn new_spinner(hidden: bool) -> Self {
        let bar = if hidden {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// Sets the label displayed next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
