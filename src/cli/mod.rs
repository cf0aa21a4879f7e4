//! Command-line interface for cc-switch.
//!
//! # Available Commands
//!
//! - `update` - Check for a newer release, install it, and repair shell completions
//! - `completion` - Print or install shell completion scripts
//! - `uninstall` - Remove cc-switch, its configuration and its completions
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--no-progress` - Disable the download progress bar
//!
//! `RUST_LOG` overrides the log level chosen by the flags.
//!
//! # Example
//!
//! ```bash
//! cc-switch update
//! cc-switch completion zsh > ~/.zsh/completions/_cc-switch
//! cc-switch --verbose completion --install
//! ```

mod common;
mod completion;
mod uninstall;
mod update;

pub use common::{TerminalPrompter, parse_answer};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
///
/// Built once from the parsed [`Cli`] and passed to every command, so commands
/// never consult the flags or mutate the process environment themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Hide the download progress bar.
    pub no_progress: bool,
}

impl CliConfig {
    /// Installs the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// cc-switch command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "cc-switch",
    about = "Switch between Claude Code environment profiles",
    version,
    author,
    long_about = "cc-switch manages named environment profiles for Claude Code. These commands keep the binary and its shell completions up to date."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable the download progress bar (also set by `CC_SWITCH_NO_PROGRESS`)
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update cc-switch to the latest release
    ///
    /// Checks the latest release, asks before installing it, and replaces the
    /// running binary. Shell completions are refreshed afterwards, and repaired
    /// when no update is installed.
    Update(update::UpdateCommand),

    /// Print or install shell completion scripts
    Completion(completion::CompletionCommand),

    /// Remove cc-switch, its configuration and its shell completions
    Uninstall(uninstall::UninstallCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's error. `main` turns it into a user-facing message
    /// and a non-zero exit code.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Derive the runtime configuration from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress,
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Update(cmd) => cmd.execute(&config).await,
            Commands::Completion(cmd) => cmd.execute(),
            Commands::Uninstall(cmd) => cmd.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_config_levels() {
        let cli = Cli::try_parse_from(["cc-switch", "update"]).unwrap();
        assert_eq!(cli.build_config().log_level, "warn");

        let cli = Cli::try_parse_from(["cc-switch", "--verbose", "update"]).unwrap();
        assert_eq!(cli.build_config().log_level, "debug");

        let cli = Cli::try_parse_from(["cc-switch", "update", "-q"]).unwrap();
        assert_eq!(cli.build_config().log_level, "error");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["cc-switch", "-v", "-q", "update"]).is_err());
    }

    #[test]
    fn test_no_progress_flag() {
        let cli = Cli::try_parse_from(["cc-switch", "update", "--no-progress"]).unwrap();
        assert!(cli.build_config().no_progress);
    }

    #[test]
    fn test_update_takes_no_arguments() {
        assert!(Cli::try_parse_from(["cc-switch", "update", "1.2.0"]).is_err());
    }

    #[test]
    fn test_completion_shell_values() {
        for shell in ["bash", "zsh", "fish"] {
            assert!(Cli::try_parse_from(["cc-switch", "completion", shell]).is_ok());
        }
        assert!(Cli::try_parse_from(["cc-switch", "completion", "powershell"]).is_err());
        assert!(Cli::try_parse_from(["cc-switch", "completion", "zsh", "--install"]).is_err());
    }
}
