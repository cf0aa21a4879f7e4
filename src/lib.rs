//! cc-switch - switch between Claude Code environment profiles
//!
//! This crate holds the parts of cc-switch that keep the tool itself healthy:
//! replacing the installed binary with the latest release and keeping shell
//! completions installed for the shells the user actually runs.
//!
//! # Architecture Overview
//!
//! - `update` checks the latest release, asks before installing it, swaps the
//!   running binary (retrying through `sudo` on permission failures), then
//!   refreshes completions. When no update is installed, missing completions
//!   are repaired instead.
//! - `completion [SHELL]` prints a completion script; `completion --install`
//!   installs them for every detected shell.
//! - `uninstall` removes the binary, the configuration directory, the
//!   completion files and the managed `~/.zshrc` block.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line parsing, logging setup and command dispatch
//! - [`completion`] - Shell detection, script rendering and idempotent installs
//! - [`upgrade`] - Release lookup, binary replacement and the update state machine
//! - [`version`] - Dotted version comparison
//!
//! ## Supporting Modules
//!
//! - [`constants`] - Endpoint, timeouts, file names and rc markers
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - Atomic writes, platform identification and progress bars
//!
//! # Configuration
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CC_SWITCH_RELEASE_URL` | Latest-release metadata endpoint |
//! | `CC_SWITCH_HTTP_TIMEOUT` | Release check timeout, in seconds |
//! | `CC_SWITCH_DOWNLOAD_TIMEOUT` | Artifact download timeout, in seconds |
//! | `CC_SWITCH_ELEVATE` | Program used for privileged installs (default `sudo`) |
//! | `CC_SWITCH_NO_PROGRESS` | Hide the download progress bar |
//! | `RUST_LOG` | Log filter, overriding `--verbose`/`--quiet` |

pub mod cli;
pub mod completion;
pub mod constants;
pub mod core;
pub mod upgrade;
pub mod utils;
pub mod version;

#[cfg(test)]
pub(crate) mod test_utils;
