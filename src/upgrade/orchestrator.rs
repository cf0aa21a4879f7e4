//! The `cc-switch update` flow.
//!
//! ```text
//! Checking ──► UpToDate ─────────────────────────────┐
//!     │                                              │
//!     └──► UpdateAvailable ──► Declined ─────────────┤  ensure mode
//!                │                                   ▼
//!                └──► Replacing ──────────► RepairingCompletions ──► Done
//!                        │                  ▲       update mode
//!                        └──► PermissionRetry
//! ```
//!
//! Failures to check for updates, select an asset, or replace the binary end the
//! flow with an error. A permission failure while replacing gets exactly one
//! elevated retry, and only when the user agrees to it. Without a known home
//! directory the completion repair step is skipped with a warning.

use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::completion::{CompletionInstaller, InstallMode, InstallReport};
use crate::constants::DEFAULT_ELEVATION_PROGRAM;
use crate::core::CcSwitchError;
use crate::upgrade::release::{PlatformKey, ReleaseSource, select_asset};
use crate::upgrade::replacer::{BinaryInstall, manual_update_command};
use crate::version::current_version;

/// Steps of the update flow, recorded in the order they were entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Checking,
    UpToDate,
    UpdateAvailable,
    Declined,
    Replacing,
    PermissionRetry,
    RepairingCompletions,
    Done,
}

/// Yes/no confirmation.
pub trait Prompter {
    /// Asks `question`; `default` applies when the user just presses enter.
    fn confirm(&self, question: &str, default: bool) -> bool;
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub states: Vec<UpdateState>,
    /// Version now installed, when the binary was replaced.
    pub installed_version: Option<String>,
    pub completion_mode: InstallMode,
    /// `None` when completion repair was skipped.
    pub completions: Option<InstallReport>,
}

impl UpdateOutcome {
    #[must_use]
    pub fn final_state(&self) -> Option<UpdateState> {
        self.states.last().copied()
    }
}

/// Drives one update run.
pub struct UpdateOrchestrator<R, B, P> {
    releases: R,
    replacer: B,
    prompter: P,
    completions: Option<CompletionInstaller>,
    executable: PathBuf,
    current_version: String,
    platform: PlatformKey,
    elevation_program: String,
    states: Vec<UpdateState>,
}

impl<R, B, P> UpdateOrchestrator<R, B, P>
where
    R: ReleaseSource,
    B: BinaryInstall,
    P: Prompter,
{
    /// Targets the running build on the current platform.
    ///
    /// Pass `None` for `completions` when the shell environment is unknown;
    /// the update still runs and completion repair is skipped.
    pub fn new(
        releases: R,
        replacer: B,
        prompter: P,
        completions: Option<CompletionInstaller>,
        executable: PathBuf,
    ) -> Self {
        Self {
            releases,
            replacer,
            prompter,
            completions,
            executable,
            current_version: current_version().to_string(),
            platform: PlatformKey::current(),
            elevation_program: DEFAULT_ELEVATION_PROGRAM.to_string(),
            states: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformKey) -> Self {
        self.platform = platform;
        self
    }

    /// Program named in the retry prompt and the manual-command hint.
    #[must_use]
    pub fn with_elevation_program(mut self, program: impl Into<String>) -> Self {
        self.elevation_program = program.into();
        self
    }

    fn enter(&mut self, state: UpdateState) {
        debug!("Update state: {state:?}");
        self.states.push(state);
    }

    /// Runs the flow to completion.
    ///
    /// # Errors
    ///
    /// Every terminal failure: the update check, asset selection, a
    /// non-permission replacement failure, a declined elevated retry
    /// ([`CcSwitchError::ElevationDeclined`]) or a failed one.
    pub async fn run(mut self) -> Result<UpdateOutcome, CcSwitchError> {
        println!("Current version: {}", self.current_version);
        println!("{}", "Checking for updates...".cyan());
        self.enter(UpdateState::Checking);

        let check = self.releases.check_for_updates(&self.current_version).await?;

        if !check.has_update {
            self.enter(UpdateState::UpToDate);
            println!("{}", "You are already running the latest version.".green());
            return Ok(self.repair(InstallMode::Ensure, None));
        }

        self.enter(UpdateState::UpdateAvailable);
        println!(
            "New version available: {} -> {}",
            self.current_version,
            check.latest_version.green().bold()
        );

        if !self.prompter.confirm("Do you want to update now?", true) {
            self.enter(UpdateState::Declined);
            println!("{}", "Update cancelled.".yellow());
            return Ok(self.repair(InstallMode::Ensure, None));
        }

        self.enter(UpdateState::Replacing);
        let asset = select_asset(&check.release, &self.platform)?;
        println!("Downloading {}...", asset.name);

        match self.replacer.replace(&self.executable, &asset.download_url, false).await {
            Ok(()) => {}
            Err(error) if error.is_permission_denied() => {
                self.enter(UpdateState::PermissionRetry);
                self.retry_elevated(&error, &asset.download_url).await?;
            }
            Err(error) => return Err(error),
        }

        info!("Replaced {} with {}", self.executable.display(), check.release.tag);
        println!("{}", format!("Successfully updated to {}", check.release.tag).green());
        Ok(self.repair(InstallMode::Update, Some(check.latest_version)))
    }

    async fn retry_elevated(
        &mut self,
        error: &CcSwitchError,
        download_url: &str,
    ) -> Result<(), CcSwitchError> {
        eprintln!("{} {error}", "warning:".yellow().bold());
        if let CcSwitchError::PermissionDenied {
            hint,
            ..
        } = error
        {
            eprintln!("{hint}");
        }

        let question = format!("Retry with {}?", self.elevation_program);
        if !self.prompter.confirm(&question, false) {
            return Err(CcSwitchError::ElevationDeclined {
                command: manual_update_command(&self.executable, download_url, &self.elevation_program),
            });
        }

        self.replacer.replace(&self.executable, download_url, true).await
    }

    fn repair(mut self, mode: InstallMode, installed_version: Option<String>) -> UpdateOutcome {
        self.enter(UpdateState::RepairingCompletions);
        let report = match &self.completions {
            Some(installer) => {
                let report = installer.install(mode);
                report.print();
                Some(report)
            }
            None => {
                warn!("Shell environment unknown, skipping completion repair");
                println!("{}", "Skipped completion repair: home directory unknown".yellow());
                None
            }
        };
        self.enter(UpdateState::Done);

        UpdateOutcome {
            states: self.states,
            installed_version,
            completion_mode: mode,
            completions: report,
        }
    }
}
