//! `cc-switch uninstall`
//!
//! Removes, in order: the completion files, the managed block in `~/.zshrc`,
//! the configuration directory, and finally the executable itself. Failures on
//! the user's own files are reported as warnings so the rest still runs.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::{debug, warn};

use super::common::{TerminalPrompter, running_executable};
use crate::completion::Shell;
use crate::constants::{APP_NAME, ZSH_BLOCK_BEGIN, ZSH_BLOCK_END, ZSH_FPATH_HINT, ZSH_RC_MARKER};
use crate::upgrade::{Prompter, UpgradeConfig};
use crate::utils::fs::{atomic_write, remove_dir_if_exists, remove_file_if_exists};
use crate::utils::get_home_dir;

/// Remove cc-switch from this machine.
#[derive(Args, Debug)]
pub struct UninstallCommand {
    /// Do not ask for confirmation
    #[arg(short, long)]
    yes: bool,
}

impl UninstallCommand {
    /// # Errors
    ///
    /// Fails when the home directory or the executable cannot be located.
    pub async fn execute(self) -> Result<()> {
        let uninstaller = Uninstaller {
            home: get_home_dir()?,
            executable: running_executable()?,
            elevation_program: UpgradeConfig::from_env().elevation_program,
        };

        println!("\nThis will uninstall {APP_NAME} and remove:\n");
        println!("  • Binary: {}", uninstaller.executable.display());
        println!("  • Config: {}", uninstaller.config_dir().display());
        println!("  • Completion files\n");

        let prompter = TerminalPrompter;
        if !self.yes && !prompter.confirm(&format!("Are you sure you want to uninstall {APP_NAME}?"), false) {
            println!("Uninstall cancelled.");
            return Ok(());
        }

        uninstaller.run(&prompter).await;
        Ok(())
    }
}

/// What happened to the managed zsh block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZshBlockRemoval {
    Removed,
    /// Only partial or hand-written setup was found.
    NeedsManualCleanup,
    NotPresent,
}

/// Removes everything cc-switch put on the machine.
#[derive(Debug, Clone)]
pub struct Uninstaller {
    pub home: PathBuf,
    pub executable: PathBuf,
    pub elevation_program: String,
}

impl Uninstaller {
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config").join(APP_NAME)
    }

    /// Runs every removal step, reporting progress to the terminal.
    pub async fn run(&self, prompter: &impl Prompter) {
        for path in self.remove_completions() {
            println!("Removed: {}", path.display());
        }

        match self.remove_zsh_block() {
            Ok(ZshBlockRemoval::Removed) => {
                println!("Removed completion setup from {}", self.home.join(".zshrc").display());
            }
            Ok(ZshBlockRemoval::NeedsManualCleanup) => {
                println!("\nNote: remove these lines from ~/.zshrc manually:");
                println!("  - Lines containing \"{ZSH_RC_MARKER}\"");
                println!("  - Lines containing \"fpath=(~/{ZSH_FPATH_HINT}\"");
            }
            Ok(ZshBlockRemoval::NotPresent) => {}
            Err(e) => warn!("Could not update ~/.zshrc: {e:#}"),
        }

        let config_dir = self.config_dir();
        match remove_dir_if_exists(&config_dir) {
            Ok(true) => println!("Removed: {}", config_dir.display()),
            Ok(false) => {}
            Err(e) => eprintln!(
                "{} Could not remove {}: {e}",
                "warning:".yellow().bold(),
                config_dir.display()
            ),
        }

        if self.remove_executable(prompter).await {
            println!("Removed: {}", self.executable.display());
            println!("\n{} {APP_NAME} uninstalled.", "✓".green());
        } else {
            eprintln!("\nFailed to remove the binary. Remove it manually:\n");
            eprintln!("  {} rm '{}'\n", self.elevation_program, self.executable.display());
        }
    }

    /// Deletes the completion files of every supported shell.
    ///
    /// Returns the files that were removed.
    pub fn remove_completions(&self) -> Vec<PathBuf> {
        let mut removed = Vec::new();
        for shell in Shell::ALL {
            let path = shell.completion_path(&self.home);
            match remove_file_if_exists(&path) {
                Ok(true) => removed.push(path),
                Ok(false) => {}
                Err(e) => eprintln!(
                    "{} Could not remove {}: {e}",
                    "warning:".yellow().bold(),
                    path.display()
                ),
            }
        }
        removed
    }

    /// Cuts the block between the begin and end markers out of `~/.zshrc`.
    ///
    /// # Errors
    ///
    /// Fails when the rewritten rc file cannot be saved.
    pub fn remove_zsh_block(&self) -> Result<ZshBlockRemoval> {
        let rc_path = self.home.join(".zshrc");
        // Read as bytes so non-UTF-8 content outside the block is written back unchanged
        let Ok(content) = std::fs::read(&rc_path) else {
            return Ok(ZshBlockRemoval::NotPresent);
        };

        match strip_managed_block(&content) {
            Some(stripped) => {
                atomic_write(&rc_path, &stripped)?;
                Ok(ZshBlockRemoval::Removed)
            }
            None if find(&content, ZSH_RC_MARKER.as_bytes()).is_some()
                || find(&content, ZSH_FPATH_HINT.as_bytes()).is_some() =>
            {
                Ok(ZshBlockRemoval::NeedsManualCleanup)
            }
            None => Ok(ZshBlockRemoval::NotPresent),
        }
    }

    /// Deletes the executable, offering one elevated retry on a permission
    /// failure. Returns whether the file is gone.
    pub async fn remove_executable(&self, prompter: &impl Prompter) -> bool {
        let error = match std::fs::remove_file(&self.executable) {
            Ok(()) => return true,
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(e) => e,
        };

        if error.kind() != ErrorKind::PermissionDenied {
            warn!("Could not remove {}: {error}", self.executable.display());
            return false;
        }

        let question = format!("Removing {} requires {}. Continue?", self.executable.display(), self.elevation_program);
        if !prompter.confirm(&question, true) {
            return false;
        }

        debug!("Running {} rm -f {}", self.elevation_program, self.executable.display());
        match tokio::process::Command::new(&self.elevation_program)
            .arg("rm")
            .arg("-f")
            .arg(&self.executable)
            .status()
            .await
        {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!("{} rm exited with {status}", self.elevation_program);
                false
            }
            Err(e) => {
                warn!("Failed to run {}: {e}", self.elevation_program);
                false
            }
        }
    }
}

/// `content` without the managed block, or `None` unless both markers are present.
///
/// Also drops the blank lines written around the block, so removing a block
/// restores the rc file to what it was before installation.
fn strip_managed_block(content: &[u8]) -> Option<Vec<u8>> {
    let begin = find(content, ZSH_BLOCK_BEGIN.as_bytes())?;
    let end = begin + find(&content[begin..], ZSH_BLOCK_END.as_bytes())? + ZSH_BLOCK_END.len();

    let mut prefix = &content[..begin];
    if prefix.ends_with(b"\n\n") || prefix == b"\n" {
        prefix = &prefix[..prefix.len() - 1];
    }

    let mut suffix = &content[end..];
    for _ in 0..2 {
        if let Some(rest) = suffix.strip_prefix(b"\n") {
            suffix = rest;
        }
    }

    Some([prefix, suffix].concat())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
