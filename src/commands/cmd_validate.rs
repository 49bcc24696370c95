use crate::cli::CmdValidateArgs;
use crate::prelude::*;
use std::fs;

/// Parses the document and reports success, any decode or schema failure
/// propagates with its collected messages and a non-zero exit
pub fn validate_document(cli_args: CmdValidateArgs) -> Result<()> {
    let text = fs::read_to_string(&cli_args.path)
        .with_context(|| format!("while reading {:?}", cli_args.path))?;

    crate::import::parse(&text)?;

    println!("OK: {:?} parses cleanly", cli_args.path);

    Ok(())
}
