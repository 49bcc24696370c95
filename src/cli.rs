use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Builder and round-trip editor for cloud-init user-data documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: CliCommands,
}

#[derive(Args, Debug, Clone)]
pub struct CmdFmtArgs {
    /// Rewrite the file in place instead of printing to stdout
    #[arg(short, long)]
    pub write: bool,

    /// Path to the user-data document
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CmdValidateArgs {
    /// Path to the user-data document
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CmdInspectArgs {
    /// Path to the user-data document
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CmdHashArgs {
    /// Salt to use instead of a randomly generated one
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Password to hash, read from stdin when omitted
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CmdCompletionArgs {
    /// Shell to generate completions for, detected from $SHELL when omitted
    pub shell: Option<Shell>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Print an empty document scaffold
    New,

    /// Parse a document and print it back normalized
    #[command(arg_required_else_help = true)]
    Fmt(CmdFmtArgs),

    /// Check a document against the supported schema subset
    #[command(arg_required_else_help = true)]
    Validate(CmdValidateArgs),

    /// Parse a document and show the reconstructed state
    #[command(arg_required_else_help = true)]
    Inspect(CmdInspectArgs),

    /// Hash a password with sha512-crypt for the users/chpasswd modules
    Hash(CmdHashArgs),

    /// Generate shell completions
    Completion(CmdCompletionArgs),
}
