use crate::cli::CmdFmtArgs;
use crate::prelude::*;
use crate::state::Session;
use std::fs;

/// Round-trips a document through the model, normalizing elisions and key order
pub fn format_document(cli_args: CmdFmtArgs) -> Result<()> {
    let text = fs::read_to_string(&cli_args.path)
        .with_context(|| format!("while reading {:?}", cli_args.path))?;

    let mut session = Session::default();
    session
        .load(&text)
        .with_context(|| format!("while parsing {:?}", cli_args.path))?;

    if cli_args.write {
        fs::write(&cli_args.path, session.output())
            .with_context(|| format!("while writing {:?}", cli_args.path))?;

        log::info!("rewrote {:?}", cli_args.path);
    } else {
        print!("{}", session.output());
    }

    Ok(())
}
