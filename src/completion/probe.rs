//! Detect which supported shells are in use on this host.
//!
//! A shell counts as present when any of these hold:
//! 1. the login shell (`$SHELL`) is that shell, by name or as a path ending in
//!    `/<name>`
//! 2. its rc file exists (`~/.bashrc` or `~/.bash_profile`, `~/.zshrc`, or the
//!    `~/.config/fish` directory)
//! 3. an executable with its name resolves on `PATH`
//!
//! Only the first two make it safe to edit the shell's rc file, since a shell
//! that merely exists on `PATH` may never be started interactively.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use crate::constants::APP_NAME;

/// Shells with completion support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    pub const ALL: [Self; 3] = [Self::Bash, Self::Zsh, Self::Fish];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        }
    }

    /// Standard per-user location of this shell's completion file.
    #[must_use]
    pub fn completion_path(self, home: &Path) -> PathBuf {
        match self {
            Self::Zsh => home.join(".zsh").join("completions").join(format!("_{APP_NAME}")),
            Self::Bash => home
                .join(".local")
                .join("share")
                .join("bash-completion")
                .join("completions")
                .join(APP_NAME),
            Self::Fish => home
                .join(".config")
                .join("fish")
                .join("completions")
                .join(format!("{APP_NAME}.fish")),
        }
    }

    /// The rc file cc-switch may append to. Only zsh needs one.
    #[must_use]
    pub fn managed_rc_path(self, home: &Path) -> Option<PathBuf> {
        match self {
            Self::Zsh => Some(home.join(".zshrc")),
            Self::Bash | Self::Fish => None,
        }
    }

    fn config_markers(self, home: &Path) -> Vec<PathBuf> {
        match self {
            Self::Bash => vec![home.join(".bashrc"), home.join(".bash_profile")],
            Self::Zsh => vec![home.join(".zshrc")],
            Self::Fish => vec![home.join(".config").join("fish")],
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The parts of the process environment shell detection depends on.
///
/// Passed explicitly so detection and installation can run against any home
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellEnvironment {
    pub home: PathBuf,
    /// Value of `$SHELL`.
    pub login_shell: Option<String>,
    /// Value of `$PATH`.
    pub path: Option<OsString>,
}

impl ShellEnvironment {
    /// Reads the home directory, `$SHELL` and `$PATH` of the current process.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be determined.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            home: crate::utils::get_home_dir()?,
            login_shell: std::env::var("SHELL").ok().filter(|s| !s.is_empty()),
            path: std::env::var_os("PATH"),
        })
    }

    /// `true` when the login shell is `shell`.
    #[must_use]
    pub fn is_login_shell(&self, shell: Shell) -> bool {
        self.login_shell.as_deref().is_some_and(|login| {
            let login = login.trim();
            login == shell.name() || login.ends_with(&format!("/{}", shell.name()))
        })
    }

    /// `true` when the shell's rc file (or config directory) exists.
    #[must_use]
    pub fn has_config(&self, shell: Shell) -> bool {
        shell.config_markers(&self.home).iter().any(|path| path.exists())
    }

    /// `true` when an executable named after the shell is on `PATH`.
    #[must_use]
    pub fn on_path(&self, shell: Shell) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| which::which_in(shell.name(), Some(path), &self.home).is_ok())
    }

    #[must_use]
    pub fn is_present(&self, shell: Shell) -> bool {
        self.is_login_shell(shell) || self.has_config(shell) || self.on_path(shell)
    }

    /// `true` when the shell is plausibly used interactively, so editing its rc
    /// file is warranted.
    #[must_use]
    pub fn should_mutate_rc(&self, shell: Shell) -> bool {
        self.is_login_shell(shell) || self.has_config(shell)
    }

    /// Computes the target for every supported shell.
    #[must_use]
    pub fn probe(&self) -> Vec<ShellTarget> {
        Shell::ALL
            .into_iter()
            .map(|shell| {
                let target = ShellTarget {
                    shell,
                    completion_path: shell.completion_path(&self.home),
                    rc_path: shell.managed_rc_path(&self.home),
                    present: self.is_present(shell),
                    should_mutate_rc: self.should_mutate_rc(shell),
                };
                debug!(
                    "Probed {shell}: present={} should_mutate_rc={}",
                    target.present, target.should_mutate_rc
                );
                target
            })
            .collect()
    }
}

/// Where completions for one shell go, and whether to install them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTarget {
    pub shell: Shell,
    pub completion_path: PathBuf,
    pub rc_path: Option<PathBuf>,
    pub present: bool,
    pub should_mutate_rc: bool,
}
