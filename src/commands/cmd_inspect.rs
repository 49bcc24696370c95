use crate::cli::CmdInspectArgs;
use crate::network::{Interface, Network};
use crate::passwd;
use crate::prelude::*;
use std::fs;

/// Shows the state a document reconstructs to, can be used to check how the
/// importer interprets hand-written yaml
pub fn inspect_document(cli_args: CmdInspectArgs) -> Result<()> {
    let text = fs::read_to_string(&cli_args.path)
        .with_context(|| format!("while reading {:?}", cli_args.path))?;

    let state = crate::import::parse(&text)
        .with_context(|| format!("while parsing {:?}", cli_args.path))?;

    println!("{:#?}", state);

    // best effort classification, a plain password starting with $6$ will be
    // mislabeled, see passwd::looks_hashed
    for entry in &state.chpasswd_users {
        let kind = if passwd::looks_hashed(&entry.password) {
            "hashed"
        } else {
            "plain text"
        };
        println!("chpasswd entry '{}' carries a {} password", entry.name, kind);
    }

    // entries are imported verbatim so this only informs, it never rejects
    if let Network::V1(entries) = &state.network {
        for (i, entry) in entries.iter().enumerate() {
            if Interface::from_entry(entry).is_none() {
                println!("network config entry {i} does not match the modeled interface shape");
            }
        }
    }

    Ok(())
}
