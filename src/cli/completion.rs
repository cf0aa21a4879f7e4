//! `cc-switch completion [SHELL]`

use anyhow::Result;
use clap::Args;

use crate::completion::{CompletionInstaller, InstallMode, Shell, ShellEnvironment, render_completion};
use crate::constants::{APP_NAME, ZSH_COMPINIT_LINE, ZSH_FPATH_LINE};

/// Print or install shell completion scripts.
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to print the completion script for
    #[arg(value_enum)]
    shell: Option<Shell>,

    /// Install completions for every detected shell
    #[arg(long, conflicts_with = "shell")]
    install: bool,
}

impl CompletionCommand {
    /// # Errors
    ///
    /// Fails when the script cannot be rendered or the home directory cannot be
    /// determined.
    pub fn execute(self) -> Result<()> {
        if self.install {
            let installer = CompletionInstaller::new(ShellEnvironment::from_env()?);
            installer.install(InstallMode::Update).print();
            return Ok(());
        }

        match self.shell {
            Some(shell) => print!("{}", render_completion(shell)?),
            None => print!("{}", usage_text()),
        }
        Ok(())
    }
}

/// Help shown by `cc-switch completion` without a shell.
#[must_use]
pub fn usage_text() -> String {
    format!(
        "Usage: {APP_NAME} completion <shell>

Generate shell completion script.

Supported shells:
  bash    Bash completion script
  zsh     Zsh completion script
  fish    Fish completion script

Automatic Setup:
  Completions are installed automatically when you install or update {APP_NAME}.
  Run '{APP_NAME} completion --install' to set them up again.

Manual Setup (if needed):
  # Zsh - add to ~/.zshrc
  {ZSH_FPATH_LINE}
  {ZSH_COMPINIT_LINE}

  Then generate the completion file:
  {APP_NAME} completion zsh > ~/.zsh/completions/_{APP_NAME}

  # Bash - add to ~/.bashrc
  eval \"$({APP_NAME} completion bash)\"

  # Fish
  {APP_NAME} completion fish > ~/.config/fish/completions/{APP_NAME}.fish

After setup, restart your shell or run 'source ~/.zshrc' (for zsh).
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_shells_and_manual_steps() {
        let usage = usage_text();
        assert!(usage.starts_with("Usage: cc-switch completion <shell>"));
        for shell in Shell::ALL {
            assert!(usage.contains(&format!("  {}", shell.name())));
        }
        assert!(usage.contains("fpath=(~/.zsh/completions $fpath)"));
        assert!(usage.contains("eval \"$(cc-switch completion bash)\""));
        assert!(usage.contains("~/.config/fish/completions/cc-switch.fish"));
    }
}
