//! `--generate-completions` — print a shell completion script.
//!
//! Usage:
//!   kubectl-view_secret --generate-completions bash > ~/.bash_completion.d/kubectl-view_secret
//!   kubectl-view_secret --generate-completions zsh
//!   kubectl-view_secret --generate-completions fish

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, ViewSecretError};

/// Binary name the generated script completes.
const BIN_NAME: &str = "kubectl-view_secret";

/// Execute the completions command, writing the script to `out`.
pub fn execute(shell: &str, out: &mut dyn Write) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

/// Parse a shell name string into a `Shell` enum.
fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "ps" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        other => Err(ViewSecretError::CommandFailed(format!(
            "unknown shell '{other}' — supported: bash, zsh, fish, powershell, elvish"
        ))),
    }
}
