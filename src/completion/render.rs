//! Completion script generation from the CLI definition.
//!
//! Both `cc-switch completion <shell>` and the installer call
//! [`render_completion`], so an installed script is byte-identical to what the
//! subcommand prints.

use clap::CommandFactory;

use crate::cli::Cli;
use crate::completion::Shell;
use crate::constants::APP_NAME;
use crate::core::CcSwitchError;

/// Renders the completion script for `shell`.
///
/// # Errors
///
/// Returns [`CcSwitchError::CompletionGeneration`] if the generator produces
/// output that is not valid UTF-8.
pub fn render_completion(shell: Shell) -> Result<String, CcSwitchError> {
    let generator = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
    };

    let mut command = Cli::command();
    let mut buffer = Vec::new();
    clap_complete::generate(generator, &mut command, APP_NAME, &mut buffer);

    String::from_utf8(buffer).map_err(|e| CcSwitchError::CompletionGeneration {
        shell: shell.to_string(),
        reason: e.to_string(),
    })
}
