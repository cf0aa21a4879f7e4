//! `cc-switch update`

use anyhow::Result;
use clap::Args;
use tracing::{debug, warn};

use super::CliConfig;
use super::common::{TerminalPrompter, running_executable};
use crate::completion::{CompletionInstaller, ShellEnvironment};
use crate::upgrade::{BinaryReplacer, ReleaseClient, UpdateOrchestrator, UpgradeConfig};

/// Update cc-switch to the latest release.
///
/// Takes no options; the release endpoint, timeouts and elevation program come
/// from [`UpgradeConfig::from_env`].
#[derive(Args, Debug)]
pub struct UpdateCommand {}

impl UpdateCommand {
    /// # Errors
    ///
    /// Any terminal failure of the update flow.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let upgrade = UpgradeConfig::from_env();
        debug!("Upgrade settings: {upgrade:?}");

        let executable = running_executable()?;
        let completions = match ShellEnvironment::from_env() {
            Ok(env) => Some(CompletionInstaller::new(env)),
            Err(e) => {
                warn!("Completion repair unavailable: {e:#}");
                None
            }
        };

        let releases = ReleaseClient::new(&upgrade)?;
        let mut replacer = BinaryReplacer::new(&upgrade)?;
        if config.no_progress {
            replacer = replacer.without_progress();
        }

        let outcome = UpdateOrchestrator::new(
            releases,
            replacer,
            TerminalPrompter,
            completions,
            executable,
        )
        .with_elevation_program(upgrade.elevation_program.clone())
        .run()
        .await?;

        debug!("Update finished: {:?}", outcome.states);
        Ok(())
    }
}
