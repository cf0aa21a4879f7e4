//! Progress indicator for artifact downloads.
//!
//! Wraps `indicatif` with cc-switch styling. The bar is hidden when the
//! `CC_SWITCH_NO_PROGRESS` environment variable is set or when stderr is not a
//! terminal, so scripted installs and tests stay quiet.
//!
//! ```rust,no_run
//! use cc_switch::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::download(Some(4096), "cc-switch-linux-x64");
//! progress.inc(1024);
//! progress.finish_and_clear();
//! ```

use crate::constants::ENV_NO_PROGRESS;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Checks if progress bars should be disabled.
fn is_progress_disabled() -> bool {
    std::env::var_os(ENV_NO_PROGRESS).is_some() || !std::io::stderr().is_terminal()
}

/// A byte-counting progress bar.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a progress bar for a download.
    ///
    /// With a known length the bar shows bytes transferred against the total;
    /// without one it falls back to a spinner with a running byte count.
    pub fn download(total_bytes: Option<u64>, prefix: impl Into<String>) -> Self {
        Self::with_visibility(total_bytes, prefix, !is_progress_disabled())
    }

    /// Creates a progress bar that never draws anything.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    fn with_visibility(total_bytes: Option<u64>, prefix: impl Into<String>, visible: bool) -> Self {
        if !visible {
            return Self::hidden();
        }

        let bar = match total_bytes {
            Some(len) => {
                let bar = IndicatifBar::new(len);
                bar.set_style(download_style());
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_prefix(prefix.into());
        Self {
            inner: bar,
        }
    }

    /// Advances the bar by `delta` bytes.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Current position in bytes.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finishes and removes the bar from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .map(|style| style.progress_chars("━╸━"))
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold.cyan} {spinner:.cyan} {bytes}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
}
