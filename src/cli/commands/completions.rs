//! `clasp-secrets completions` — print a shell completion script.
//!
//!   clasp-secrets completions bash > ~/.local/share/bash-completion/completions/clasp-secrets
//!   clasp-secrets completions zsh > "${fpath[1]}/_clasp-secrets"

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

const BIN_NAME: &str = "clasp-secrets";

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Render the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}
