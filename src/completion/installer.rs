//! Install completion scripts and the zsh rc hook for every detected shell.
//!
//! For each present shell the installer renders the script, writes it to the
//! shell's completion directory when the content differs from what is on disk,
//! and for zsh appends a one-time block to `~/.zshrc`:
//!
//! ```text
//!
//! # >>> cc-switch completions >>>
//! fpath=(~/.zsh/completions $fpath)
//! autoload -Uz compinit && compinit
//! # <<< cc-switch completions <<<
//!
//! ```
//!
//! The `compinit` line is left out when the rc file already runs `compinit` or
//! loads a plugin framework that does. The block is never appended when the rc
//! file already mentions `cc-switch completions` or `.zsh/completions`.
//!
//! Installation never fails as a whole: a shell whose script cannot be rendered
//! or written is skipped with a warning and the remaining shells proceed.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use regex::Regex;
use tracing::{debug, warn};

use crate::completion::probe::{Shell, ShellEnvironment, ShellTarget};
use crate::completion::render::render_completion;
use crate::constants::{
    ZSH_BLOCK_BEGIN, ZSH_BLOCK_END, ZSH_COMPINIT_LINE, ZSH_FPATH_HINT, ZSH_FPATH_LINE,
    ZSH_FRAMEWORKS, ZSH_RC_MARKER,
};
use crate::core::CcSwitchError;
use crate::utils::fs::{atomic_write, ensure_dir};

/// How the installer was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Repair only. Reports nothing when everything is already in place.
    Ensure,
    /// Right after a binary update or an explicit install. Always reports.
    Update,
}

/// A shell whose installation was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedShell {
    pub shell: Shell,
    pub reason: String,
}

/// What an installer run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub mode: InstallMode,
    /// Completion files written, in shell order.
    pub written: Vec<(Shell, PathBuf)>,
    /// The rc file the zsh block was appended to.
    pub rc_updated: Option<PathBuf>,
    pub skipped: Vec<SkippedShell>,
    /// Present shells whose files were already current.
    pub unchanged: Vec<Shell>,
    /// zsh was touched and is plausibly the shell in use.
    pub restart_hint: bool,
}

impl InstallReport {
    fn new(mode: InstallMode) -> Self {
        Self {
            mode,
            written: Vec::new(),
            rc_updated: None,
            skipped: Vec::new(),
            unchanged: Vec::new(),
            restart_hint: false,
        }
    }

    /// Shells with at least one file written or rc file changed.
    #[must_use]
    pub fn changed_shells(&self) -> BTreeSet<Shell> {
        let mut shells: BTreeSet<Shell> = self.written.iter().map(|(shell, _)| *shell).collect();
        if self.rc_updated.is_some() {
            shells.insert(Shell::Zsh);
        }
        shells
    }

    #[must_use]
    pub fn touched(&self, shell: Shell) -> bool {
        self.changed_shells().contains(&shell)
    }

    /// `true` when the run wrote nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.written.is_empty() && self.rc_updated.is_none()
    }

    /// Prints the outcome for the user.
    ///
    /// In [`InstallMode::Ensure`] an unchanged run prints nothing.
    pub fn print(&self) {
        if self.is_unchanged() {
            if self.mode == InstallMode::Update && self.skipped.is_empty() {
                if self.unchanged.is_empty() {
                    println!("{}", "No supported shells detected; skipped completions".dimmed());
                } else {
                    println!("{}", "Shell completions are up to date".green());
                }
            }
        } else {
            let verb = match self.mode {
                InstallMode::Ensure => "Repaired",
                InstallMode::Update => "Installed",
            };
            for (shell, path) in &self.written {
                println!("{} {verb} {shell} completions: {}", "✓".green(), path.display());
            }
            if let Some(rc) = &self.rc_updated {
                println!("{} Added completion setup to {}", "✓".green(), rc.display());
            }
        }

        if self.mode == InstallMode::Update {
            for skipped in &self.skipped {
                eprintln!(
                    "{} Skipped {} completions: {}",
                    "warning:".yellow().bold(),
                    skipped.shell,
                    skipped.reason
                );
            }
        }

        if self.restart_hint {
            println!(
                "{}",
                "Restart your shell or run 'source ~/.zshrc' to enable completions".cyan()
            );
        }
    }
}

/// Signature of the completion generator.
pub type Renderer = fn(Shell) -> Result<String, CcSwitchError>;

/// Installs completions for the shells present in a [`ShellEnvironment`].
#[derive(Debug, Clone)]
pub struct CompletionInstaller {
    env: ShellEnvironment,
    render: Renderer,
}

impl CompletionInstaller {
    #[must_use]
    pub fn new(env: ShellEnvironment) -> Self {
        Self {
            env,
            render: render_completion,
        }
    }

    /// Replaces the completion generator.
    #[must_use]
    pub fn with_renderer(mut self, render: Renderer) -> Self {
        self.render = render;
        self
    }

    #[must_use]
    pub const fn environment(&self) -> &ShellEnvironment {
        &self.env
    }

    /// Installs or repairs completions for every present shell.
    pub fn install(&self, mode: InstallMode) -> InstallReport {
        let mut report = InstallReport::new(mode);

        for target in self.env.probe() {
            if !target.present {
                debug!("{} not detected, skipping", target.shell);
                continue;
            }

            if let Err(e) = self.install_target(&target, &mut report) {
                warn!("Skipping {} completions: {e}", target.shell);
                report.skipped.push(SkippedShell {
                    shell: target.shell,
                    reason: e.to_string(),
                });
            }
        }

        report.restart_hint = report.touched(Shell::Zsh) && self.env.should_mutate_rc(Shell::Zsh);
        report
    }

    fn install_target(
        &self,
        target: &ShellTarget,
        report: &mut InstallReport,
    ) -> Result<(), CcSwitchError> {
        let script = (self.render)(target.shell)?;

        let wrote = write_if_changed(target.shell, &target.completion_path, &script)?;
        if wrote {
            debug!("Wrote {}", target.completion_path.display());
            report.written.push((target.shell, target.completion_path.clone()));
        }

        let mut rc_changed = false;
        if let Some(rc_path) = &target.rc_path {
            if target.should_mutate_rc {
                rc_changed = append_zsh_block(rc_path)?;
                if rc_changed {
                    report.rc_updated = Some(rc_path.clone());
                }
            } else {
                debug!("Not editing {}: {} is not in interactive use", rc_path.display(), target.shell);
            }
        }

        if !wrote && !rc_changed {
            report.unchanged.push(target.shell);
        }
        Ok(())
    }
}

/// Writes `script` to `path` unless the file already holds exactly that.
fn write_if_changed(shell: Shell, path: &Path, script: &str) -> Result<bool, CcSwitchError> {
    if fs::read(path).is_ok_and(|existing| existing == script.as_bytes()) {
        return Ok(false);
    }

    let write_error = |e: anyhow::Error| CcSwitchError::CompletionWrite {
        shell: shell.to_string(),
        path: path.display().to_string(),
        reason: format!("{e:#}"),
    };

    if let Some(parent) = path.parent() {
        ensure_dir(parent).map_err(write_error)?;
    }
    atomic_write(path, script.as_bytes()).map_err(write_error)?;
    Ok(true)
}

/// Appends the managed block to the zsh rc file unless it is already set up.
fn append_zsh_block(rc_path: &Path) -> Result<bool, CcSwitchError> {
    // Missing or unreadable rc content counts as empty; invalid UTF-8 is decoded lossily
    let bytes = fs::read(rc_path).unwrap_or_default();
    let content = String::from_utf8_lossy(&bytes);
    if content.contains(ZSH_RC_MARKER) || content.contains(ZSH_FPATH_HINT) {
        debug!("{} already configures completions", rc_path.display());
        return Ok(false);
    }

    let write_error = |e: std::io::Error| CcSwitchError::CompletionWrite {
        shell: Shell::Zsh.to_string(),
        path: rc_path.display().to_string(),
        reason: e.to_string(),
    };

    let mut file =
        OpenOptions::new().create(true).append(true).open(rc_path).map_err(write_error)?;
    file.write_all(zsh_rc_block(&content).as_bytes()).map_err(write_error)?;
    Ok(true)
}

/// The block appended to `~/.zshrc`, given its current content.
#[must_use]
pub fn zsh_rc_block(rc_content: &str) -> String {
    let mut block = String::from("\n");
    block.push_str(ZSH_BLOCK_BEGIN);
    block.push('\n');
    block.push_str(ZSH_FPATH_LINE);
    block.push('\n');
    if !initializes_completion(rc_content) {
        block.push_str(ZSH_COMPINIT_LINE);
        block.push('\n');
    }
    block.push_str(ZSH_BLOCK_END);
    block.push_str("\n\n");
    block
}

/// Whether the rc file runs `compinit` itself or through a plugin framework.
fn initializes_completion(rc_content: &str) -> bool {
    let frameworks: Vec<String> = ZSH_FRAMEWORKS.iter().map(|name| regex::escape(name)).collect();
    let pattern = format!(r"(?i:{})|\bcompinit\b", frameworks.join("|"));

    match Regex::new(&pattern) {
        Ok(re) => re.is_match(rc_content),
        Err(e) => {
            warn!("Invalid framework pattern: {e}");
            false
        }
    }
}
