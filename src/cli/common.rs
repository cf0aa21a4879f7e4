//! Shared helpers for CLI commands.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use crate::upgrade::Prompter;

/// Confirmation prompts on the controlling terminal.
///
/// When stdin is not a terminal nobody can answer, so every question is
/// answered "no" without blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> bool {
        if !io::stdin().is_terminal() {
            eprintln!("{} {question} (non-interactive, assuming no)", "→".cyan());
            return false;
        }

        let choices = if default {
            "[Y/n]"
        } else {
            "[y/N]"
        };
        print!("{} ", format!("{question} {choices}:").green());
        let _ = io::stdout().flush();

        let mut response = String::new();
        match io::stdin().lock().read_line(&mut response) {
            Ok(_) => parse_answer(&response, default),
            Err(e) => {
                debug!("Failed to read answer: {e}");
                false
            }
        }
    }
}

/// Interprets a yes/no answer. An empty answer selects `default`.
#[must_use]
pub fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Path of the running executable, with symlinks resolved.
///
/// Package-manager installs often put a symlink on `PATH`; the file it points
/// at is the one to replace or remove.
pub(crate) fn running_executable() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    Ok(exe.canonicalize().unwrap_or(exe))
}
