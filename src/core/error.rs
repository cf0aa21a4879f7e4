//! Error handling for cc-switch
//!
//! This module provides the error types and user-friendly error reporting for the
//! self-update and shell integration commands. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can branch on the failure mode (the update
//!    flow depends on telling a permission failure apart from every other failure)
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`CcSwitchError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Network**: [`CcSwitchError::UpdateCheckFailed`], [`CcSwitchError::NetworkTimeout`]
//! - **Release selection**: [`CcSwitchError::UnsupportedPlatform`], [`CcSwitchError::AssetNotFound`]
//! - **Binary replacement**: [`CcSwitchError::UpdateFailed`], [`CcSwitchError::PermissionDenied`],
//!   [`CcSwitchError::ElevatedUpdateFailed`], [`CcSwitchError::ElevationDeclined`]
//! - **Shell completions**: [`CcSwitchError::CompletionGeneration`],
//!   [`CcSwitchError::CompletionWrite`] (always recovered locally, never fatal)
//!
//! # Examples
//!
//! ```rust,no_run
//! use cc_switch::core::{CcSwitchError, user_friendly_error};
//!
//! let error = CcSwitchError::UnsupportedPlatform {
//!     os: "windows".to_string(),
//!     arch: "x64".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::GITHUB_REPO;

/// The main error type for cc-switch operations
///
/// Each variant represents one failure mode of the update and shell integration
/// flows. Variants carry plain strings rather than source errors so that they can be
/// cloned into an [`ErrorContext`] for display.
#[derive(Error, Debug)]
pub enum CcSwitchError {
    /// Release metadata could not be fetched or decoded
    ///
    /// Covers unreachable endpoints, non-success HTTP status codes and payloads that
    /// do not match the release schema.
    #[error("Failed to check for updates: {reason}")]
    UpdateCheckFailed {
        /// Underlying cause
        reason: String,
    },

    /// A network request exceeded its configured time limit
    #[error("Network timeout: {operation} did not finish within {seconds}s")]
    NetworkTimeout {
        /// The request that timed out
        operation: String,
        /// Limit that was exceeded
        seconds: u64,
    },

    /// No prebuilt artifact exists for this OS/architecture pair
    #[error("Unsupported platform: {os}-{arch}")]
    UnsupportedPlatform {
        /// Operating system identifier
        os: String,
        /// CPU architecture identifier
        arch: String,
    },

    /// The release does not contain the artifact for this platform
    #[error("No release asset found for {asset} in release {tag}")]
    AssetNotFound {
        /// Expected asset name
        asset: String,
        /// Release tag that was searched
        tag: String,
    },

    /// Downloading or staging the new binary failed
    #[error("Update failed: {reason}")]
    UpdateFailed {
        /// Underlying cause
        reason: String,
    },

    /// Insufficient privileges to modify a path
    ///
    /// Raised by the binary swap when the install location is not writable. The
    /// update flow treats this variant as recoverable through an elevated retry.
    #[error("Permission denied: {operation} ({path})")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// Path that could not be modified
        path: String,
        /// Remediation hint shown to the user
        hint: String,
    },

    /// The elevated retry itself failed
    #[error("Elevated update failed: {reason}")]
    ElevatedUpdateFailed {
        /// Underlying cause
        reason: String,
    },

    /// The user declined the elevated retry after a permission failure
    #[error("Update was not installed: elevated retry declined")]
    ElevationDeclined {
        /// Command the user can run to finish the update by hand
        command: String,
    },

    /// The completion script for a shell could not be rendered
    #[error("Failed to generate {shell} completions: {reason}")]
    CompletionGeneration {
        /// Shell name
        shell: String,
        /// Underlying cause
        reason: String,
    },

    /// The completion script or rc block for a shell could not be written
    #[error("Failed to write {shell} completions to {path}: {reason}")]
    CompletionWrite {
        /// Shell name
        shell: String,
        /// Target path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CcSwitchError {
    fn clone(&self) -> Self {
        match self {
            Self::UpdateCheckFailed {
                reason,
            } => Self::UpdateCheckFailed {
                reason: reason.clone(),
            },
            Self::NetworkTimeout {
                operation,
                seconds,
            } => Self::NetworkTimeout {
                operation: operation.clone(),
                seconds: *seconds,
            },
            Self::UnsupportedPlatform {
                os,
                arch,
            } => Self::UnsupportedPlatform {
                os: os.clone(),
                arch: arch.clone(),
            },
            Self::AssetNotFound {
                asset,
                tag,
            } => Self::AssetNotFound {
                asset: asset.clone(),
                tag: tag.clone(),
            },
            Self::UpdateFailed {
                reason,
            } => Self::UpdateFailed {
                reason: reason.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
                hint,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
                hint: hint.clone(),
            },
            Self::ElevatedUpdateFailed {
                reason,
            } => Self::ElevatedUpdateFailed {
                reason: reason.clone(),
            },
            Self::ElevationDeclined {
                command,
            } => Self::ElevationDeclined {
                command: command.clone(),
            },
            Self::CompletionGeneration {
                shell,
                reason,
            } => Self::CompletionGeneration {
                shell: shell.clone(),
                reason: reason.clone(),
            },
            Self::CompletionWrite {
                shell,
                path,
                reason,
            } => Self::CompletionWrite {
                shell: shell.clone(),
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::HomeDirNotFound => Self::HomeDirNotFound,
            // io::Error is not Clone; keep kind and message
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl CcSwitchError {
    /// Returns `true` for the failure the update flow can recover from by retrying
    /// with elevated privileges.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Pairs a [`CcSwitchError`] with optional details (why it happened) and an optional
/// suggestion (what to do next). This is what the CLI prints for terminal failures.
///
/// ```rust,no_run
/// use cc_switch::core::{CcSwitchError, ErrorContext};
///
/// let context = ErrorContext::new(CcSwitchError::HomeDirNotFound)
///     .with_suggestion("Set the HOME environment variable")
///     .with_details("Shell completions are installed below the home directory");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CcSwitchError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: CcSwitchError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are actionable steps, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow below the error line.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises, in order:
/// - [`CcSwitchError`] variants anywhere in the context chain
/// - [`std::io::Error`] with filesystem-specific guidance
/// - Anything else, reported with its full cause chain
///
/// ```rust,no_run
/// use cc_switch::core::user_friendly_error;
/// use std::io::{Error, ErrorKind};
///
/// let io_error = Error::new(ErrorKind::PermissionDenied, "access denied");
/// let context = user_friendly_error(anyhow::Error::from(io_error));
/// context.display(); // Shows permission-related suggestions
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(switch_error) = error.downcast_ref::<CcSwitchError>() {
        return create_error_context(switch_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CcSwitchError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                    hint: String::new(),
                })
                .with_suggestion("Check file ownership, or retry the command with sudo")
                .with_details(
                    "This error occurs when cc-switch doesn't have permission to read or write a file",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CcSwitchError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CcSwitchError::Other {
        message,
    })
}

/// Map each [`CcSwitchError`] variant to a context with tailored suggestions.
fn create_error_context(error: CcSwitchError) -> ErrorContext {
    let releases_url = format!("https://github.com/{GITHUB_REPO}/releases");

    match &error {
        CcSwitchError::UpdateCheckFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check your internet connection and try again in a few minutes")
            .with_details(
                "Unauthenticated requests to the GitHub API are rate limited; heavy use from one IP address can also cause this",
            ),

        CcSwitchError::NetworkTimeout { .. } => ErrorContext::new(error).with_suggestion(
            "Retry on a faster connection, or raise the limit with CC_SWITCH_HTTP_TIMEOUT / CC_SWITCH_DOWNLOAD_TIMEOUT (seconds)",
        ),

        CcSwitchError::UnsupportedPlatform { .. } => ErrorContext::new(error)
            .with_suggestion("Build from source with 'cargo install cc-switch'")
            .with_details("Prebuilt binaries are published for darwin-arm64, darwin-x64 and linux-x64"),

        CcSwitchError::AssetNotFound { .. } => ErrorContext::new(error)
            .with_suggestion(format!(
                "The release may still be uploading. Try again later or download it manually from {releases_url}"
            ))
            .with_details("The installed binary was not modified"),

        CcSwitchError::UpdateFailed { .. } => ErrorContext::new(error)
            .with_suggestion(format!("Download the binary manually from {releases_url}"))
            .with_details("The installed binary was not modified"),

        CcSwitchError::PermissionDenied { path, hint, .. } => {
            let suggestion = if hint.is_empty() {
                "Check file ownership, or retry the command with sudo".to_string()
            } else {
                hint.clone()
            };
            let details = format!("cc-switch cannot write to {path}");
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }

        CcSwitchError::ElevatedUpdateFailed { .. } => ErrorContext::new(error)
            .with_suggestion(format!("Download the binary manually from {releases_url}")),

        CcSwitchError::ElevationDeclined { command } => {
            let suggestion = format!("Finish the update manually:\n  {command}");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        CcSwitchError::CompletionGeneration { .. } | CcSwitchError::CompletionWrite { .. } => {
            ErrorContext::new(error)
                .with_suggestion("Print the script with 'cc-switch completion <shell>' and install it by hand")
        }

        CcSwitchError::HomeDirNotFound => {
            let suggestion = if crate::utils::is_windows() {
                "Check that the USERPROFILE environment variable is set"
            } else {
                "Check that the HOME environment variable is set"
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        CcSwitchError::Other { .. } => ErrorContext::new(error),
    }
}
