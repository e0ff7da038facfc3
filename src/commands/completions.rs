//! # Shell Completions
//!
//! Generates completion scripts with `clap_complete` for `--completions`.
//!
//! ```bash
//! gh-repo-init --completions bash > ~/.local/share/bash-completion/completions/gh-repo-init
//! gh-repo-init --completions zsh > ~/.zfunc/_gh-repo-init
//! ```
//!
//! The generated scripts know the long flag spellings only; `-rd` and `-rv`
//! are rewritten before parsing and are not completable.

use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Write the completion script for `shell` to stdout.
pub fn execute(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(Shell::from(shell), &mut cmd, "gh-repo-init", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_long_flags() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut cmd, "gh-repo-init", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("--folder_name"));
        assert!(script.contains("--protect-branch"));
    }
}
