use crate::cli::CmdCompletionArgs;
use crate::prelude::*;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::IsTerminal;

/// Writes a completion script for the requested shell to stdout
pub fn shell_completion_generation(cli_args: CmdCompletionArgs) -> Result<()> {
    // a completion script on the terminal helps nobody, it belongs in a file
    // or an eval in the shell rc
    if std::io::stdout().is_terminal() {
        return Err(anyhow!(
            "stdout is a terminal, pipe the script into a file instead"
        ));
    }

    let shell = match cli_args.shell {
        Some(x) => x,
        None => Shell::from_env().ok_or_else(|| {
            anyhow!("Could not detect the shell from $SHELL, pass it as an argument")
        })?,
    };

    generate(
        shell,
        &mut crate::cli::Cli::command(),
        env!("CARGO_BIN_NAME"),
        &mut std::io::stdout(),
    );

    Ok(())
}
