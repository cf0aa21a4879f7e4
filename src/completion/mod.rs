//! Shell completion support.
//!
//! - [`probe`] - which of bash, zsh and fish are in use
//! - [`render`] - completion scripts generated from the CLI definition
//! - [`installer`] - writes the scripts and the zsh rc hook
//!
//! ```rust,no_run
//! use cc_switch::completion::{CompletionInstaller, InstallMode, ShellEnvironment};
//!
//! # fn example() -> anyhow::Result<()> {
//! let installer = CompletionInstaller::new(ShellEnvironment::from_env()?);
//! let report = installer.install(InstallMode::Ensure);
//! report.print();
//! # Ok(())
//! # }
//! ```

pub mod installer;
pub mod probe;
pub mod render;

pub use installer::{CompletionInstaller, InstallMode, InstallReport, SkippedShell};
pub use probe::{Shell, ShellEnvironment, ShellTarget};
pub use render::render_completion;
