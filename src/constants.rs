//! Global constants used throughout the cc-switch codebase.
//!
//! This module contains the application identity, release endpoint, network
//! timeouts, and the marker strings used to recognise shell configuration
//! written by cc-switch. Defining them centrally keeps the update and
//! completion code free of magic values.

use std::time::Duration;

/// Binary and application name. Also the prefix of every release asset.
pub const APP_NAME: &str = "cc-switch";

/// GitHub repository (`owner/name`) that publishes releases.
pub const GITHUB_REPO: &str = "mipawn/cc-switch";

/// Latest-release metadata endpoint queried by `cc-switch update`.
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/mipawn/cc-switch/releases/latest";

/// Timeout for the release metadata request (15 seconds).
pub const RELEASE_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for downloading a release artifact (5 minutes).
///
/// Release binaries are tens of megabytes; this bounds a stalled transfer
/// without cutting off slow but progressing connections.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for establishing any HTTP connection (10 seconds).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Program used to re-run the binary swap with superuser rights.
pub const DEFAULT_ELEVATION_PROGRAM: &str = "sudo";

/// Substring identifying the zsh rc block written by cc-switch.
///
/// Both the opening and closing marker lines contain it, so a plain
/// substring search recognises blocks written by any version.
pub const ZSH_RC_MARKER: &str = "cc-switch completions";

/// Opening line of the managed zsh rc block.
pub const ZSH_BLOCK_BEGIN: &str = "# >>> cc-switch completions >>>";

/// Closing line of the managed zsh rc block.
pub const ZSH_BLOCK_END: &str = "# <<< cc-switch completions <<<";

/// Substring meaning the user already put the completion directory on `fpath`.
pub const ZSH_FPATH_HINT: &str = ".zsh/completions";

/// Line prepending the completion directory to zsh's `fpath`.
pub const ZSH_FPATH_LINE: &str = "fpath=(~/.zsh/completions $fpath)";

/// Line initialising zsh's completion system.
pub const ZSH_COMPINIT_LINE: &str = "autoload -Uz compinit && compinit";

/// zsh plugin frameworks that run `compinit` themselves.
///
/// Matched case-insensitively against the rc file; when one is referenced the
/// managed block leaves completion initialisation to the framework.
pub const ZSH_FRAMEWORKS: &[&str] = &[
    "oh-my-zsh",
    "prezto",
    "zinit",
    "zplug",
    "antigen",
    "antidote",
    "zimfw",
    "sheldon",
    "znap",
];

/// Environment variable overriding the release metadata endpoint.
pub const ENV_RELEASE_URL: &str = "CC_SWITCH_RELEASE_URL";

/// Environment variable overriding the metadata timeout (seconds).
pub const ENV_HTTP_TIMEOUT: &str = "CC_SWITCH_HTTP_TIMEOUT";

/// Environment variable overriding the download timeout (seconds).
pub const ENV_DOWNLOAD_TIMEOUT: &str = "CC_SWITCH_DOWNLOAD_TIMEOUT";

/// Environment variable overriding the elevation program.
pub const ENV_ELEVATE: &str = "CC_SWITCH_ELEVATE";

/// Environment variable disabling the download progress bar when set.
pub const ENV_NO_PROGRESS: &str = "CC_SWITCH_NO_PROGRESS";
