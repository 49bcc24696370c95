mod cli;
mod cmdlist;
mod commands;
mod emit;
mod import;
mod network;
mod passwd;
mod state;
mod vars;

#[cfg(test)]
mod tests;

pub use vars::*;

pub mod prelude {
    pub use anyhow::{anyhow, Context, Result};
}

use clap::Parser;
use cli::CliCommands;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // level is taken from the environ so there is no cli flag for it
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
        .expect("Failed to initialize logger");

    match command(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn command(args: cli::Cli) -> anyhow::Result<()> {
    match args.cmd {
        CliCommands::New => commands::new_document(),
        CliCommands::Fmt(x) => commands::format_document(x),
        CliCommands::Validate(x) => commands::validate_document(x),
        CliCommands::Inspect(x) => commands::inspect_document(x),
        CliCommands::Hash(x) => commands::hash_password(x),
        CliCommands::Completion(x) => commands::shell_completion_generation(x),
    }
}
